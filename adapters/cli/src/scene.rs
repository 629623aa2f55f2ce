//! Translates world state into the scene consumed by the rendering backend.

use eco_defender_core::{Tuning, WorldPoint};
use eco_defender_rendering::{EnemyPresentation, Scene, TowerPresentation};
use eco_defender_world::{query, World};
use glam::Vec2;

/// Overlay lines that only depend on the active tuning.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Legend {
    lines: [String; 3],
}

impl Legend {
    pub(crate) fn from_tuning(tuning: &Tuning) -> Self {
        let towers = &tuning.towers;
        let economy = &tuning.economy;
        Self {
            lines: [
                format!("Press 1: Tree (${}) [Attacks enemies]", towers.tree_cost),
                format!(
                    "Press 2: Solar (${}, +{} power/sec) [Fragile: destroyed on enemy contact]",
                    towers.solar_cost, economy.solar_power_per_second
                ),
                format!(
                    "Press 3: Recycle (${}, -{} power/sec, +${}/sec) [Fragile: destroyed on enemy contact]",
                    towers.recycle_cost,
                    economy.recycle_power_per_second,
                    economy.recycle_money_per_second
                ),
            ],
        }
    }
}

/// Replaces the scene contents with the current towers, enemies and overlay.
pub(crate) fn populate(scene: &mut Scene, world: &World, legend: &Legend) {
    scene.clear();

    let half_size = query::tuning(world).enemies.half_size;
    scene.towers.extend(
        query::tower_view(world)
            .iter()
            .map(|tower| TowerPresentation::new(tower.kind, to_vec2(tower.position), tower.radius)),
    );
    scene.enemies.extend(
        query::enemy_view(world)
            .iter()
            .map(|enemy| EnemyPresentation::new(to_vec2(enemy.position), half_size, enemy.health)),
    );

    let economy = query::economy(world);
    scene.overlay.extend(legend.lines.iter().cloned());
    scene.overlay.push(format!(
        "Selected Tower: {}",
        query::selection(world).name()
    ));
    scene.overlay.push(format!(
        "Money: ${:.1}   Power: {:.1}   City Health: {}",
        economy.money, economy.power, economy.city_health
    ));
}

fn to_vec2(point: WorldPoint) -> Vec2 {
    Vec2::new(point.x(), point.y())
}
