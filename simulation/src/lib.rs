#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame orchestration that drives the world through every gameplay system.
//!
//! A frame runs the systems in a fixed order: player input, spawning, time
//! advance, targeting and combat, collision, enemy resolution and finally the
//! resource economy. Each system only reads world views and emits commands,
//! which are applied immediately so the next system observes their effects.

use std::time::Duration;

use eco_defender_core::{Command, Event, PlayerAction, TowerTarget, Tuning, TuningError};
use eco_defender_system_builder::Builder;
use eco_defender_system_collision::Collision;
use eco_defender_system_economy::Economy;
use eco_defender_system_spawning::{Config as SpawningConfig, Spawning};
use eco_defender_system_tower_combat::TowerCombat;
use eco_defender_system_tower_targeting::TowerTargeting;
use eco_defender_world::{self as world, query, World};
use tracing::{debug, info};

/// Whether the game continues after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The city still stands.
    Running,
    /// City health reached zero during or before this frame.
    GameOver,
}

/// Everything that happened during a single frame.
#[derive(Debug, PartialEq)]
pub struct FrameReport {
    /// Events emitted by the world, in the order they occurred.
    pub events: Vec<Event>,
    /// State of the game once the frame completed.
    pub outcome: Outcome,
}

/// Owns the world together with every system that acts on it.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    builder: Builder,
    spawning: Spawning,
    targeting: TowerTargeting,
    combat: TowerCombat,
    collision: Collision,
    economy: Economy,
    commands: Vec<Command>,
    targets: Vec<TowerTarget>,
}

impl Simulation {
    /// Validates `tuning` and builds a fresh game whose enemy lanes derive from `seed`.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let spawning = Spawning::new(SpawningConfig::from_tuning(&tuning.enemies, seed));
        let economy = Economy::new(&tuning.economy);
        info!(seed, "simulation_created");

        Ok(Self {
            world: World::with_tuning(tuning),
            builder: Builder::new(),
            spawning,
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            collision: Collision::new(),
            economy,
            commands: Vec::new(),
            targets: Vec::new(),
        })
    }

    /// Read-only access to the world for rendering and inspection.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Advances the game by `dt`, applying the provided player actions first.
    ///
    /// Once the city has fallen the world is left untouched and every further
    /// call reports [`Outcome::GameOver`] without events.
    pub fn step(&mut self, dt: Duration, actions: &[PlayerAction]) -> FrameReport {
        let mut events = Vec::new();
        if query::city_fallen(&self.world) {
            return FrameReport {
                events,
                outcome: Outcome::GameOver,
            };
        }

        let selection = query::selection(&self.world);
        self.builder.handle(selection, actions, &mut self.commands);
        self.flush(&mut events);

        self.spawning.handle(dt, &mut self.commands);
        self.commands.push(Command::Tick { dt });
        self.flush(&mut events);

        let towers = query::tower_view(&self.world);
        let enemies = query::enemy_view(&self.world);
        self.targeting.handle(&towers, &enemies, &mut self.targets);
        self.combat.handle(&towers, &self.targets, &mut self.commands);
        self.flush(&mut events);

        let towers = query::tower_view(&self.world);
        let enemies = query::enemy_view(&self.world);
        let half_size = query::tuning(&self.world).enemies.half_size;
        self.collision
            .handle(&towers, &enemies, half_size, &mut self.commands);
        self.commands.push(Command::ResolveEnemies);
        self.flush(&mut events);

        let towers = query::tower_view(&self.world);
        self.economy.handle(&towers, dt, &mut self.commands);
        self.flush(&mut events);

        log_events(&events);

        let outcome = if query::city_fallen(&self.world) {
            Outcome::GameOver
        } else {
            Outcome::Running
        };
        FrameReport { events, outcome }
    }

    fn flush(&mut self, events: &mut Vec<Event>) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }
    }
}

fn log_events(events: &[Event]) {
    for event in events {
        match event {
            Event::TowerPurchased {
                tower,
                kind,
                position,
                cost,
            } => info!(
                tower = tower.get(),
                kind = kind.name(),
                x = position.x(),
                y = position.y(),
                cost,
                "tower_purchased"
            ),
            Event::TowerPurchaseRejected { kind, reason, .. } => {
                debug!(kind = kind.name(), ?reason, "tower_purchase_rejected");
            }
            Event::TowerDestroyed { tower, kind } => {
                info!(tower = tower.get(), kind = kind.name(), "tower_destroyed");
            }
            Event::EnemySpawned { enemy, position } => {
                debug!(enemy = enemy.get(), lane = position.y(), "enemy_spawned");
            }
            Event::EnemyKilled { enemy, reward } => {
                debug!(enemy = enemy.get(), reward, "enemy_killed");
            }
            Event::EnemyBreached { enemy, city_health } => {
                info!(enemy = enemy.get(), city_health, "enemy_breached");
            }
            Event::CityFell => info!("city_fell"),
            Event::TimeAdvanced { .. }
            | Event::SelectionChanged { .. }
            | Event::TowerFired { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_defender_core::{TowerKind, WorldPoint};

    #[test]
    fn invalid_tuning_is_rejected() {
        let mut tuning = Tuning::default();
        tuning.field.frame_rate = 0;
        assert!(matches!(
            Simulation::new(tuning, 1),
            Err(TuningError::ZeroFrameRate)
        ));
    }

    #[test]
    fn every_frame_advances_time() {
        let mut simulation = Simulation::new(Tuning::default(), 1).expect("default tuning");
        let dt = Duration::from_millis(16);
        let report = simulation.step(dt, &[]);
        assert_eq!(report.outcome, Outcome::Running);
        assert!(report.events.contains(&Event::TimeAdvanced { dt }));
    }

    #[test]
    fn selection_applies_before_placement_in_the_same_frame() {
        let mut simulation = Simulation::new(Tuning::default(), 1).expect("default tuning");
        let report = simulation.step(
            Duration::from_millis(16),
            &[
                PlayerAction::SelectTower(TowerKind::Solar),
                PlayerAction::PlaceAt(WorldPoint::new(400.0, 300.0)),
            ],
        );

        let purchased = report.events.iter().find_map(|event| match event {
            Event::TowerPurchased { kind, .. } => Some(*kind),
            _ => None,
        });
        assert_eq!(purchased, Some(TowerKind::Solar));
    }
}
