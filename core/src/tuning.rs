//! Gameplay constants with the prototype's values as defaults.
//!
//! Every section deserialises with `#[serde(default)]`, so configuration files
//! only need the keys they override.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TowerKind;

/// Complete set of gameplay constants.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Play field dimensions and frame rate.
    pub field: FieldTuning,
    /// Starting balances and per-second resource rates.
    pub economy: EconomyTuning,
    /// Tower costs and attack parameters.
    pub towers: TowerTuning,
    /// Enemy stats and spawn cadence.
    pub enemies: EnemyTuning,
}

/// Play field dimensions and frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTuning {
    /// Field width in pixels; enemies beyond it breach the city.
    pub width: f32,
    /// Field height in pixels.
    pub height: f32,
    /// Target frames per second.
    pub frame_rate: u32,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            frame_rate: 60,
        }
    }
}

/// Starting balances and per-second resource rates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyTuning {
    /// Money available when the game starts.
    pub starting_money: f64,
    /// Power available when the game starts.
    pub starting_power: f64,
    /// City health available when the game starts.
    pub starting_city_health: u32,
    /// Money credited for every killed enemy.
    pub kill_reward: f64,
    /// Power produced per second by each Solar tower.
    pub solar_power_per_second: f64,
    /// Power consumed per second by each Recycle tower.
    pub recycle_power_per_second: f64,
    /// Money produced per second by each Recycle tower.
    pub recycle_money_per_second: f64,
}

impl Default for EconomyTuning {
    fn default() -> Self {
        Self {
            starting_money: 100.0,
            starting_power: 300.0,
            starting_city_health: 10,
            kill_reward: 5.0,
            solar_power_per_second: 1.0,
            recycle_power_per_second: 3.0,
            recycle_money_per_second: 1.0,
        }
    }
}

/// Tower costs and attack parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerTuning {
    /// Radius shared by every tower kind.
    pub radius: f32,
    /// Price of a Tree tower.
    pub tree_cost: f64,
    /// Price of a Solar tower.
    pub solar_cost: f64,
    /// Price of a Recycle tower.
    pub recycle_cost: f64,
    /// Tree tower attack range in pixels.
    pub tree_range: f32,
    /// Health removed by a Tree tower hit.
    pub tree_damage: i32,
    /// Tree tower cooldown in milliseconds.
    pub tree_cooldown_ms: u64,
}

impl TowerTuning {
    /// Price of the provided tower kind.
    #[must_use]
    pub const fn cost(&self, kind: TowerKind) -> f64 {
        match kind {
            TowerKind::Tree => self.tree_cost,
            TowerKind::Solar => self.solar_cost,
            TowerKind::Recycle => self.recycle_cost,
        }
    }

    /// Tree tower cooldown as a duration.
    #[must_use]
    pub const fn tree_cooldown(&self) -> Duration {
        Duration::from_millis(self.tree_cooldown_ms)
    }
}

impl Default for TowerTuning {
    fn default() -> Self {
        Self {
            radius: 20.0,
            tree_cost: 5.0,
            solar_cost: 10.0,
            recycle_cost: 50.0,
            tree_range: 100.0,
            tree_damage: 2,
            tree_cooldown_ms: 1_000,
        }
    }
}

/// Enemy stats and spawn cadence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Horizontal speed in pixels per second.
    pub speed: f32,
    /// Health of a freshly spawned enemy.
    pub health: i32,
    /// Half the side length of an enemy's square body.
    pub half_size: f32,
    /// Time that must be exceeded between spawns, in milliseconds.
    pub spawn_interval_ms: u64,
    /// Smallest lane an enemy may spawn on.
    pub lane_min: u32,
    /// Largest lane an enemy may spawn on.
    pub lane_max: u32,
}

impl EnemyTuning {
    /// Spawn interval as a duration.
    #[must_use]
    pub const fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            speed: 50.0,
            health: 5,
            half_size: 10.0,
            spawn_interval_ms: 2_000,
            lane_min: 50,
            lane_max: 550,
        }
    }
}

/// Reasons a tuning configuration is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum TuningError {
    /// The field must have a positive area.
    #[error("field dimensions must be positive (received {width}x{height})")]
    EmptyField {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// The frame rate must be at least one frame per second.
    #[error("frame rate must be positive")]
    ZeroFrameRate,
    /// Enemies must spawn at a positive interval.
    #[error("enemy spawn interval must be positive")]
    ZeroSpawnInterval,
    /// The spawn lane band must be ordered and lie inside the field.
    #[error("enemy lane band {min}..={max} does not fit a field of height {height}")]
    InvalidLaneBand {
        /// Configured lower lane.
        min: u32,
        /// Configured upper lane.
        max: u32,
        /// Configured field height.
        height: f32,
    },
    /// The named value must not be negative.
    #[error("`{name}` must not be negative")]
    Negative {
        /// Configuration key holding the offending value.
        name: &'static str,
    },
    /// The game needs at least one point of city health to start.
    #[error("starting city health must be positive")]
    ZeroCityHealth,
}

impl Tuning {
    /// Checks that the configuration can drive a game.
    pub fn validate(&self) -> Result<(), TuningError> {
        let field = &self.field;
        if !(field.width > 0.0 && field.height > 0.0) {
            return Err(TuningError::EmptyField {
                width: field.width,
                height: field.height,
            });
        }
        if field.frame_rate == 0 {
            return Err(TuningError::ZeroFrameRate);
        }

        let enemies = &self.enemies;
        if enemies.spawn_interval_ms == 0 {
            return Err(TuningError::ZeroSpawnInterval);
        }
        if enemies.lane_min > enemies.lane_max || enemies.lane_max as f32 > field.height {
            return Err(TuningError::InvalidLaneBand {
                min: enemies.lane_min,
                max: enemies.lane_max,
                height: field.height,
            });
        }
        if self.economy.starting_city_health == 0 {
            return Err(TuningError::ZeroCityHealth);
        }

        let non_negative: [(&'static str, f64); 14] = [
            ("economy.starting_money", self.economy.starting_money),
            ("economy.starting_power", self.economy.starting_power),
            ("economy.kill_reward", self.economy.kill_reward),
            ("economy.solar_power_per_second", self.economy.solar_power_per_second),
            ("economy.recycle_power_per_second", self.economy.recycle_power_per_second),
            ("economy.recycle_money_per_second", self.economy.recycle_money_per_second),
            ("towers.radius", f64::from(self.towers.radius)),
            ("towers.tree_cost", self.towers.tree_cost),
            ("towers.solar_cost", self.towers.solar_cost),
            ("towers.recycle_cost", self.towers.recycle_cost),
            ("towers.tree_range", f64::from(self.towers.tree_range)),
            ("towers.tree_damage", f64::from(self.towers.tree_damage)),
            ("enemies.speed", f64::from(enemies.speed)),
            ("enemies.half_size", f64::from(enemies.half_size)),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(TuningError::Negative { name });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_prototype_constants() {
        let tuning = Tuning::default();
        assert_eq!(tuning.field.width, 800.0);
        assert_eq!(tuning.field.height, 600.0);
        assert_eq!(tuning.field.frame_rate, 60);
        assert_eq!(tuning.towers.cost(TowerKind::Tree), 5.0);
        assert_eq!(tuning.towers.cost(TowerKind::Solar), 10.0);
        assert_eq!(tuning.towers.cost(TowerKind::Recycle), 50.0);
        assert_eq!(tuning.towers.tree_cooldown(), Duration::from_secs(1));
        assert_eq!(tuning.enemies.spawn_interval(), Duration::from_secs(2));
        assert_eq!(tuning.economy.starting_city_health, 10);
        assert_eq!(tuning.validate(), Ok(()));
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let tuning: Tuning = toml::from_str(
            r#"
            [economy]
            starting_money = 250.0

            [enemies]
            speed = 80.0
            "#,
        )
        .expect("valid toml");

        assert_eq!(tuning.economy.starting_money, 250.0);
        assert_eq!(tuning.economy.starting_power, 300.0);
        assert_eq!(tuning.enemies.speed, 80.0);
        assert_eq!(tuning.enemies.health, 5);
        assert_eq!(tuning.towers, TowerTuning::default());
    }

    #[test]
    fn zero_spawn_interval_is_rejected() {
        let mut tuning = Tuning::default();
        tuning.enemies.spawn_interval_ms = 0;
        assert_eq!(tuning.validate(), Err(TuningError::ZeroSpawnInterval));
    }

    #[test]
    fn inverted_lane_band_is_rejected() {
        let mut tuning = Tuning::default();
        tuning.enemies.lane_min = 400;
        tuning.enemies.lane_max = 100;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvalidLaneBand { min: 400, max: 100, .. })
        ));
    }

    #[test]
    fn negative_rates_name_the_offending_key() {
        let mut tuning = Tuning::default();
        tuning.economy.recycle_money_per_second = -1.0;
        assert_eq!(
            tuning.validate(),
            Err(TuningError::Negative {
                name: "economy.recycle_money_per_second"
            })
        );
    }
}
