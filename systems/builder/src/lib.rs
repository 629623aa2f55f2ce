#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns player input into tower selection and purchase commands.

use eco_defender_core::{Command, PlayerAction, TowerKind};

/// Builder system that translates ordered frame input into commands.
#[derive(Debug, Default, Clone)]
pub struct Builder;

impl Builder {
    /// Creates a new builder system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits commands for the actions captured during a frame.
    ///
    /// `selection` is the kind currently selected in the world. Actions are
    /// processed in arrival order, so a click that follows a hotkey within the
    /// same frame buys the newly selected kind. Affordability is left to the
    /// world, which rejects purchases it cannot fund.
    pub fn handle(&mut self, selection: TowerKind, actions: &[PlayerAction], out: &mut Vec<Command>) {
        let mut pending = selection;
        for action in actions {
            match *action {
                PlayerAction::SelectTower(kind) => {
                    pending = kind;
                    out.push(Command::SelectTowerKind { kind });
                }
                PlayerAction::PlaceAt(position) => {
                    out.push(Command::PurchaseTower {
                        kind: pending,
                        position,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_defender_core::WorldPoint;

    #[test]
    fn click_uses_current_selection() {
        let mut builder = Builder::new();
        let mut commands = Vec::new();

        builder.handle(
            TowerKind::Solar,
            &[PlayerAction::PlaceAt(WorldPoint::new(40.0, 60.0))],
            &mut commands,
        );

        assert_eq!(
            commands,
            vec![Command::PurchaseTower {
                kind: TowerKind::Solar,
                position: WorldPoint::new(40.0, 60.0),
            }]
        );
    }

    #[test]
    fn selection_before_click_applies_within_the_frame() {
        let mut builder = Builder::new();
        let mut commands = Vec::new();

        builder.handle(
            TowerKind::Tree,
            &[
                PlayerAction::SelectTower(TowerKind::Recycle),
                PlayerAction::PlaceAt(WorldPoint::new(1.0, 2.0)),
            ],
            &mut commands,
        );

        assert_eq!(
            commands,
            vec![
                Command::SelectTowerKind {
                    kind: TowerKind::Recycle,
                },
                Command::PurchaseTower {
                    kind: TowerKind::Recycle,
                    position: WorldPoint::new(1.0, 2.0),
                },
            ]
        );
    }

    #[test]
    fn last_selection_wins() {
        let mut builder = Builder::new();
        let mut commands = Vec::new();

        builder.handle(
            TowerKind::Tree,
            &[
                PlayerAction::SelectTower(TowerKind::Solar),
                PlayerAction::SelectTower(TowerKind::Recycle),
                PlayerAction::SelectTower(TowerKind::Tree),
            ],
            &mut commands,
        );

        assert_eq!(
            commands.last(),
            Some(&Command::SelectTowerKind {
                kind: TowerKind::Tree,
            })
        );
    }

    #[test]
    fn no_input_emits_nothing() {
        let mut builder = Builder::new();
        let mut commands = Vec::new();
        builder.handle(TowerKind::Tree, &[], &mut commands);
        assert!(commands.is_empty());
    }
}
