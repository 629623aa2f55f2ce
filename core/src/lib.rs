#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Eco Defender engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then reports [`Event`] values
//! describing what actually happened. Systems read immutable views such as
//! [`TowerView`] and [`EnemyView`] and respond exclusively with new command
//! batches.

mod tuning;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use tuning::{EconomyTuning, EnemyTuning, FieldTuning, TowerTuning, Tuning, TuningError};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Eco Defender.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Changes the tower kind used by subsequent purchases.
    SelectTowerKind {
        /// Kind the player picked.
        kind: TowerKind,
    },
    /// Attempts to buy a tower at the provided field position.
    PurchaseTower {
        /// Kind of tower to construct.
        kind: TowerKind,
        /// Field position of the tower's centre.
        position: WorldPoint,
    },
    /// Advances tower cooldowns and enemy movement by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Appends a new enemy at the left edge of the field.
    SpawnEnemy {
        /// Vertical lane the enemy walks along.
        lane: f32,
    },
    /// Requests that a tower fire at an enemy.
    FireTower {
        /// Identifier of the firing tower.
        tower: TowerId,
        /// Identifier of the enemy being shot.
        enemy: EnemyId,
    },
    /// Requests that a fragile tower be destroyed after enemy contact.
    DestroyTower {
        /// Identifier of the tower to remove.
        tower: TowerId,
    },
    /// Removes dead enemies and enemies that crossed the far edge.
    ResolveEnemies,
    /// Applies money and power deltas, clamping both at zero.
    AdjustResources {
        /// Change applied to the money balance.
        money: f64,
        /// Change applied to the power reserve.
        power: f64,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the tower selection changed.
    SelectionChanged {
        /// Kind now selected for purchases.
        kind: TowerKind,
    },
    /// Confirms that a tower was bought and placed.
    TowerPurchased {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Kind of tower that was placed.
        kind: TowerKind,
        /// Field position of the tower's centre.
        position: WorldPoint,
        /// Money deducted for the purchase.
        cost: f64,
    },
    /// Reports that a purchase request changed nothing.
    TowerPurchaseRejected {
        /// Kind of tower requested.
        kind: TowerKind,
        /// Field position provided in the request.
        position: WorldPoint,
        /// Specific reason the purchase failed.
        reason: PurchaseError,
    },
    /// Confirms that an enemy entered the field.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Position the enemy occupies after spawning.
        position: WorldPoint,
    },
    /// Confirms that a tower hit an enemy.
    TowerFired {
        /// Identifier of the tower that fired.
        tower: TowerId,
        /// Identifier of the enemy that was hit.
        enemy: EnemyId,
        /// Health the enemy has left after the hit.
        remaining_health: i32,
    },
    /// Confirms that a fragile tower was destroyed.
    TowerDestroyed {
        /// Identifier of the destroyed tower.
        tower: TowerId,
        /// Kind of the destroyed tower.
        kind: TowerKind,
    },
    /// Reports that an enemy died and paid out its reward.
    EnemyKilled {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
        /// Money credited for the kill.
        reward: f64,
    },
    /// Reports that an enemy crossed the far edge of the field.
    EnemyBreached {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
        /// City health remaining after the breach.
        city_health: u32,
    },
    /// Announces that city health reached zero.
    CityFell,
}

/// Player intents gathered by adapters during a single frame, in arrival order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerAction {
    /// Hotkey selecting the tower kind for later purchases.
    SelectTower(TowerKind),
    /// Click requesting a purchase at a field position.
    PlaceAt(WorldPoint),
}

/// Reasons a purchase request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseError {
    /// The money balance is below the tower's cost.
    InsufficientFunds,
}

/// Types of towers that can be bought.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    /// Ranged damage dealer that enemies cannot destroy.
    Tree,
    /// Passive power generator destroyed on enemy contact.
    Solar,
    /// Power-consuming money generator destroyed on enemy contact.
    Recycle,
}

impl TowerKind {
    /// Every tower kind in hotkey order.
    pub const ALL: [TowerKind; 3] = [TowerKind::Tree, TowerKind::Solar, TowerKind::Recycle];

    /// Human readable name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tree => "Tree",
            Self::Solar => "Solar",
            Self::Recycle => "Recycle",
        }
    }

    /// Single-letter label drawn on top of the tower.
    #[must_use]
    pub const fn label(self) -> char {
        match self {
            Self::Tree => 'T',
            Self::Solar => 'S',
            Self::Recycle => 'R',
        }
    }

    /// Reports whether enemy contact destroys towers of this kind.
    #[must_use]
    pub const fn is_fragile(self) -> bool {
        matches!(self, Self::Solar | Self::Recycle)
    }
}

/// Unique identifier assigned to a tower, increasing in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy, increasing in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Position on the play field measured in pixels from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a new field position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance between two positions.
    #[must_use]
    pub fn distance_to(self, other: WorldPoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Attack parameters of a tower that can shoot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponSnapshot {
    /// Maximum distance at which the tower can hit an enemy.
    pub range: f32,
    /// Health removed from the enemy per hit.
    pub damage: i32,
    /// Time left before the tower may fire again.
    pub ready_in: Duration,
}

impl WeaponSnapshot {
    /// Reports whether the cooldown has fully elapsed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready_in.is_zero()
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Field position of the tower's centre.
    pub position: WorldPoint,
    /// Radius used for drawing and contact checks.
    pub radius: f32,
    /// Attack parameters, present only for towers that shoot.
    pub weapon: Option<WeaponSnapshot>,
}

/// Read-only snapshot describing all towers on the field.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view, ordering snapshots by creation.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a tower by identifier.
    #[must_use]
    pub fn get(&self, tower: TowerId) -> Option<&TowerSnapshot> {
        self.snapshots
            .binary_search_by_key(&tower, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of towers of the provided kind.
    #[must_use]
    pub fn count(&self, kind: TowerKind) -> usize {
        self.snapshots
            .iter()
            .filter(|snapshot| snapshot.kind == kind)
            .count()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Current field position of the enemy's centre.
    pub position: WorldPoint,
    /// Health left; the enemy dies at zero or below.
    pub health: i32,
}

/// Read-only snapshot describing all enemies on the field.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view, ordering snapshots by creation.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Money, power and city health at a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EconomySnapshot {
    /// Money available for purchases.
    pub money: f64,
    /// Power reserve.
    pub power: f64,
    /// Remaining city health; the game ends at zero.
    pub city_health: u32,
}

/// Target chosen for a tower during the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TowerTarget {
    /// Tower that will fire.
    pub tower: TowerId,
    /// Enemy the tower aims at.
    pub enemy: EnemyId,
}

#[cfg(test)]
mod tests {
    use super::{
        EnemyId, EnemySnapshot, EnemyView, TowerId, TowerKind, TowerSnapshot, TowerView,
        WeaponSnapshot, WorldPoint,
    };
    use std::time::Duration;

    #[test]
    fn distance_is_euclidean() {
        let origin = WorldPoint::new(0.0, 0.0);
        let other = WorldPoint::new(3.0, 4.0);
        assert!((origin.distance_to(other) - 5.0).abs() < f32::EPSILON);
        assert!((other.distance_to(origin) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn only_solar_and_recycle_are_fragile() {
        assert!(!TowerKind::Tree.is_fragile());
        assert!(TowerKind::Solar.is_fragile());
        assert!(TowerKind::Recycle.is_fragile());
    }

    #[test]
    fn labels_use_first_letter_of_name() {
        for kind in TowerKind::ALL {
            assert_eq!(kind.name().chars().next(), Some(kind.label()));
        }
    }

    #[test]
    fn views_are_ordered_by_creation() {
        let enemies = EnemyView::from_snapshots(vec![
            EnemySnapshot {
                id: EnemyId::new(4),
                position: WorldPoint::new(1.0, 1.0),
                health: 5,
            },
            EnemySnapshot {
                id: EnemyId::new(2),
                position: WorldPoint::new(9.0, 1.0),
                health: 5,
            },
        ]);
        let ids: Vec<u32> = enemies.iter().map(|enemy| enemy.id.get()).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn tower_view_counts_and_looks_up_by_id() {
        let tower = |id: u32, kind: TowerKind| TowerSnapshot {
            id: TowerId::new(id),
            kind,
            position: WorldPoint::default(),
            radius: 20.0,
            weapon: None,
        };
        let view = TowerView::from_snapshots(vec![
            tower(3, TowerKind::Solar),
            tower(1, TowerKind::Recycle),
            tower(2, TowerKind::Solar),
        ]);

        assert_eq!(view.count(TowerKind::Solar), 2);
        assert_eq!(view.count(TowerKind::Tree), 0);
        assert_eq!(
            view.get(TowerId::new(1)).map(|snapshot| snapshot.kind),
            Some(TowerKind::Recycle)
        );
        assert!(view.get(TowerId::new(9)).is_none());
    }

    #[test]
    fn weapon_is_ready_only_after_cooldown() {
        let mut weapon = WeaponSnapshot {
            range: 100.0,
            damage: 2,
            ready_in: Duration::from_millis(1),
        };
        assert!(!weapon.is_ready());
        weapon.ready_in = Duration::ZERO;
        assert!(weapon.is_ready());
    }
}
