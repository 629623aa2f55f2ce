#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that detects enemies touching fragile towers.

use eco_defender_core::{Command, EnemyView, TowerId, TowerView};

/// Contact detection between enemies and Solar/Recycle towers.
#[derive(Debug, Default)]
pub struct Collision {
    doomed: Vec<TowerId>,
}

impl Collision {
    /// Creates a new collision system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::DestroyTower` for every fragile tower an enemy touches.
    ///
    /// A tower is touched when the distance between centres is at most the
    /// tower radius plus `enemy_half_size`. Every pair is checked; each tower
    /// is reported once, in the order contacts are found.
    pub fn handle(
        &mut self,
        towers: &TowerView,
        enemies: &EnemyView,
        enemy_half_size: f32,
        out: &mut Vec<Command>,
    ) {
        self.doomed.clear();

        for enemy in enemies.iter() {
            for tower in towers.iter() {
                if !tower.kind.is_fragile() || self.doomed.contains(&tower.id) {
                    continue;
                }

                let reach = tower.radius + enemy_half_size;
                if tower.position.distance_to(enemy.position) <= reach {
                    self.doomed.push(tower.id);
                }
            }
        }

        out.extend(
            self.doomed
                .iter()
                .map(|&tower| Command::DestroyTower { tower }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_defender_core::{EnemyId, EnemySnapshot, TowerKind, TowerSnapshot, WorldPoint};

    fn tower(id: u32, kind: TowerKind, x: f32, y: f32) -> TowerSnapshot {
        TowerSnapshot {
            id: TowerId::new(id),
            kind,
            position: WorldPoint::new(x, y),
            radius: 20.0,
            weapon: None,
        }
    }

    fn enemy(id: u32, x: f32, y: f32) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            position: WorldPoint::new(x, y),
            health: 5,
        }
    }

    fn collide(towers: Vec<TowerSnapshot>, enemies: Vec<EnemySnapshot>) -> Vec<Command> {
        let mut system = Collision::new();
        let mut out = Vec::new();
        system.handle(
            &TowerView::from_snapshots(towers),
            &EnemyView::from_snapshots(enemies),
            10.0,
            &mut out,
        );
        out
    }

    #[test]
    fn contact_destroys_fragile_towers() {
        let out = collide(
            vec![
                tower(1, TowerKind::Solar, 100.0, 100.0),
                tower(2, TowerKind::Recycle, 300.0, 100.0),
            ],
            vec![enemy(1, 75.0, 100.0), enemy(2, 290.0, 110.0)],
        );

        assert_eq!(
            out,
            vec![
                Command::DestroyTower {
                    tower: TowerId::new(1),
                },
                Command::DestroyTower {
                    tower: TowerId::new(2),
                },
            ]
        );
    }

    #[test]
    fn contact_distance_is_inclusive() {
        let touching = collide(
            vec![tower(1, TowerKind::Solar, 30.0, 0.0)],
            vec![enemy(1, 0.0, 0.0)],
        );
        assert_eq!(touching.len(), 1);

        let apart = collide(
            vec![tower(1, TowerKind::Solar, 30.5, 0.0)],
            vec![enemy(1, 0.0, 0.0)],
        );
        assert!(apart.is_empty());
    }

    #[test]
    fn tree_towers_are_immune() {
        let out = collide(
            vec![tower(1, TowerKind::Tree, 0.0, 0.0)],
            vec![enemy(1, 0.0, 0.0)],
        );
        assert!(out.is_empty());
    }

    #[test]
    fn tower_touched_by_several_enemies_is_reported_once() {
        let out = collide(
            vec![tower(4, TowerKind::Recycle, 50.0, 50.0)],
            vec![enemy(1, 45.0, 50.0), enemy(2, 55.0, 50.0)],
        );
        assert_eq!(
            out,
            vec![Command::DestroyTower {
                tower: TowerId::new(4),
            }]
        );
    }
}
