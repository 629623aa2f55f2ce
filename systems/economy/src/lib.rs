#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that derives per-frame money and power flows from the towers on the field.

use std::time::Duration;

use eco_defender_core::{Command, EconomyTuning, TowerKind, TowerView};

/// Resource production and consumption for Solar and Recycle towers.
#[derive(Clone, Copy, Debug)]
pub struct Economy {
    solar_power_per_second: f64,
    recycle_power_per_second: f64,
    recycle_money_per_second: f64,
}

impl Economy {
    /// Creates an economy system from the configured rates.
    #[must_use]
    pub const fn new(tuning: &EconomyTuning) -> Self {
        Self {
            solar_power_per_second: tuning.solar_power_per_second,
            recycle_power_per_second: tuning.recycle_power_per_second,
            recycle_money_per_second: tuning.recycle_money_per_second,
        }
    }

    /// Emits a single `Command::AdjustResources` covering `dt`.
    ///
    /// Recycle towers keep producing money when power is exhausted; the world
    /// only clamps the balances at zero.
    pub fn handle(&self, towers: &TowerView, dt: Duration, out: &mut Vec<Command>) {
        let solar = towers.count(TowerKind::Solar) as f64;
        let recycle = towers.count(TowerKind::Recycle) as f64;
        if solar == 0.0 && recycle == 0.0 {
            return;
        }

        let seconds = dt.as_secs_f64();
        let power = solar * self.solar_power_per_second * seconds
            - recycle * self.recycle_power_per_second * seconds;
        let money = recycle * self.recycle_money_per_second * seconds;
        out.push(Command::AdjustResources { money, power });
    }
}
