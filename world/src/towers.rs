//! Authoritative tower state management utilities.

use std::time::Duration;

use eco_defender_core::{TowerId, TowerKind, TowerSnapshot, TowerTuning, WeaponSnapshot, WorldPoint};

/// Kind-specific payload carried by a tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum TowerState {
    /// Shooting tower with its weapon and cooldown.
    Tree(TreeWeapon),
    /// Power generator.
    Solar,
    /// Money generator.
    Recycle,
}

impl TowerState {
    fn for_kind(kind: TowerKind, tuning: &TowerTuning) -> Self {
        match kind {
            TowerKind::Tree => Self::Tree(TreeWeapon {
                range: tuning.tree_range,
                damage: tuning.tree_damage,
                cooldown: tuning.tree_cooldown(),
                ready_in: Duration::ZERO,
            }),
            TowerKind::Solar => Self::Solar,
            TowerKind::Recycle => Self::Recycle,
        }
    }

    pub(crate) const fn kind(&self) -> TowerKind {
        match self {
            Self::Tree(_) => TowerKind::Tree,
            Self::Solar => TowerKind::Solar,
            Self::Recycle => TowerKind::Recycle,
        }
    }
}

/// Weapon of a Tree tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TreeWeapon {
    pub(crate) range: f32,
    pub(crate) damage: i32,
    pub(crate) cooldown: Duration,
    pub(crate) ready_in: Duration,
}

impl TreeWeapon {
    fn snapshot(&self) -> WeaponSnapshot {
        WeaponSnapshot {
            range: self.range,
            damage: self.damage,
            ready_in: self.ready_in,
        }
    }
}

/// Tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct Tower {
    pub(crate) id: TowerId,
    pub(crate) position: WorldPoint,
    pub(crate) radius: f32,
    pub(crate) state: TowerState,
}

impl Tower {
    pub(crate) fn snapshot(&self) -> TowerSnapshot {
        let weapon = match &self.state {
            TowerState::Tree(weapon) => Some(weapon.snapshot()),
            TowerState::Solar | TowerState::Recycle => None,
        };
        TowerSnapshot {
            id: self.id,
            kind: self.state.kind(),
            position: self.position,
            radius: self.radius,
            weapon,
        }
    }
}

/// Registry that stores towers in creation order and allocates identifiers.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: Vec<Tower>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    pub(crate) fn insert(
        &mut self,
        kind: TowerKind,
        position: WorldPoint,
        tuning: &TowerTuning,
    ) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().saturating_add(1));
        self.entries.push(Tower {
            id,
            position,
            radius: tuning.radius,
            state: TowerState::for_kind(kind, tuning),
        });
        id
    }

    pub(crate) fn remove(&mut self, tower: TowerId) -> Option<Tower> {
        let index = self.entries.iter().position(|entry| entry.id == tower)?;
        Some(self.entries.remove(index))
    }

    pub(crate) fn get(&self, tower: TowerId) -> Option<&Tower> {
        self.entries.iter().find(|entry| entry.id == tower)
    }

    pub(crate) fn weapon_mut(&mut self, tower: TowerId) -> Option<&mut TreeWeapon> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == tower)
            .and_then(|entry| match &mut entry.state {
                TowerState::Tree(weapon) => Some(weapon),
                TowerState::Solar | TowerState::Recycle => None,
            })
    }

    pub(crate) fn advance_cooldowns(&mut self, dt: Duration) {
        for entry in &mut self.entries {
            if let TowerState::Tree(weapon) = &mut entry.state {
                weapon.ready_in = weapon.ready_in.saturating_sub(dt);
            }
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Tower> {
        self.entries.iter()
    }
}
