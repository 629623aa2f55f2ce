#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits tower firing commands from targeting data.

use eco_defender_core::{Command, TowerTarget, TowerView};

/// Tower combat system that queues firing commands for ready towers.
#[derive(Debug, Default)]
pub struct TowerCombat {
    scratch: Vec<Command>,
}

impl TowerCombat {
    /// Creates a new tower combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::FireTower` entries for armed towers ready to fire.
    ///
    /// The world re-checks readiness when applying the command and its check is authoritative.
    pub fn handle(&mut self, towers: &TowerView, tower_targets: &[TowerTarget], out: &mut Vec<Command>) {
        if tower_targets.is_empty() {
            return;
        }

        self.scratch.clear();

        for target in tower_targets {
            let ready = towers
                .get(target.tower)
                .and_then(|snapshot| snapshot.weapon)
                .is_some_and(|weapon| weapon.is_ready());
            if ready {
                self.scratch.push(Command::FireTower {
                    tower: target.tower,
                    enemy: target.enemy,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
