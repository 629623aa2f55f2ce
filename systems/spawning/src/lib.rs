#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting enemy spawn commands.

use std::time::Duration;

use eco_defender_core::{Command, EnemyTuning};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: Duration,
    lane_min: u32,
    lane_max: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided cadence, lane band and seed.
    #[must_use]
    pub const fn new(spawn_interval: Duration, lane_min: u32, lane_max: u32, rng_seed: u64) -> Self {
        Self {
            spawn_interval,
            lane_min,
            lane_max,
            rng_seed,
        }
    }

    /// Derives a configuration from enemy tuning.
    #[must_use]
    pub const fn from_tuning(tuning: &EnemyTuning, rng_seed: u64) -> Self {
        Self::new(
            tuning.spawn_interval(),
            tuning.lane_min,
            tuning.lane_max,
            rng_seed,
        )
    }
}

/// Pure system that emits a spawn command whenever the spawn timer runs out.
#[derive(Debug)]
pub struct Spawning {
    spawn_interval: Duration,
    lane_min: u32,
    lane_max: u32,
    accumulator: Duration,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_interval: config.spawn_interval,
            lane_min: config.lane_min.min(config.lane_max),
            lane_max: config.lane_max.max(config.lane_min),
            accumulator: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Accumulates `dt` and emits at most one spawn command.
    ///
    /// The timer must strictly exceed the interval, and it restarts from zero
    /// after a spawn; any overshoot within the frame is discarded.
    pub fn handle(&mut self, dt: Duration, out: &mut Vec<Command>) {
        self.accumulator = self.accumulator.saturating_add(dt);
        if self.accumulator <= self.spawn_interval {
            return;
        }

        self.accumulator = Duration::ZERO;
        let lane = self.rng.gen_range(self.lane_min..=self.lane_max);
        out.push(Command::SpawnEnemy { lane: lane as f32 });
    }

    /// Time accumulated toward the next spawn.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.accumulator
    }
}
