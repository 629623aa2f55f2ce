#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Rules of the turn-based pollution game and its line-oriented console session.
//!
//! The game keeps a single pollution level that starts at
//! [`STARTING_POLLUTION`]. Every turn the player picks an action whose effect
//! is drawn from a fixed range, and the game ends as soon as the level leaves
//! the open interval `(0, POLLUTION_CEILING)`.

mod session;

use std::ops::RangeInclusive;

use rand::Rng;

pub use session::{run_session, SessionError, INTRO_BANNER};

/// Pollution level at the start of a game.
pub const STARTING_POLLUTION: i32 = 50;

/// Pollution level at which the environment collapses.
pub const POLLUTION_CEILING: i32 = 100;

/// Action picked by the player for a single turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Choice {
    /// Option 1: very effective.
    PlantTrees,
    /// Option 2: moderately effective.
    AwarenessCampaign,
    /// Option 3: slight effect that may backfire.
    MonitorEmissions,
    /// Anything else; penalised as mismanagement.
    Mismanagement,
}

impl Choice {
    /// Interprets a line typed by the player.
    ///
    /// Only the trailing line terminator is stripped, so `"1 "` counts as
    /// mismanagement just like any other unknown input.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        match line.trim_end_matches(['\n', '\r']) {
            "1" => Self::PlantTrees,
            "2" => Self::AwarenessCampaign,
            "3" => Self::MonitorEmissions,
            _ => Self::Mismanagement,
        }
    }

    /// Inclusive range the pollution change is drawn from.
    #[must_use]
    pub const fn change_range(self) -> RangeInclusive<i32> {
        match self {
            Self::PlantTrees => -10..=-5,
            Self::AwarenessCampaign => -5..=0,
            Self::MonitorEmissions => -2..=2,
            Self::Mismanagement => 1..=5,
        }
    }

    /// Feedback printed after the choice is applied.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::PlantTrees => "You planted trees! Nature is grateful.",
            Self::AwarenessCampaign => "You launched an awareness campaign. People start caring!",
            Self::MonitorEmissions => "You are monitoring emissions carefully.",
            Self::Mismanagement => "Invalid choice! Mismanagement increased the pollution.",
        }
    }
}

/// Whether the game is still running and, if not, how it ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Pollution is strictly between zero and the ceiling.
    Ongoing,
    /// Pollution dropped to zero or below.
    Restored,
    /// Pollution reached the ceiling or above.
    Collapsed,
}

/// Outcome of a single turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnReport {
    /// Turn number the report belongs to.
    pub turn: u32,
    /// Action that was applied.
    pub choice: Choice,
    /// Change drawn for the action.
    pub change: i32,
    /// Pollution level after the change.
    pub level: i32,
}

/// State of a pollution game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pollution {
    level: i32,
    turn: u32,
}

impl Default for Pollution {
    fn default() -> Self {
        Self {
            level: STARTING_POLLUTION,
            turn: 1,
        }
    }
}

impl Pollution {
    /// Starts a new game at the default pollution level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pollution level.
    #[must_use]
    pub const fn level(&self) -> i32 {
        self.level
    }

    /// Number of the turn about to be played.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Reports whether the game continues.
    #[must_use]
    pub const fn status(&self) -> Status {
        if self.level <= 0 {
            Status::Restored
        } else if self.level >= POLLUTION_CEILING {
            Status::Collapsed
        } else {
            Status::Ongoing
        }
    }

    /// Applies `choice` with a change drawn from `rng` and advances the turn.
    pub fn play<R: Rng + ?Sized>(&mut self, choice: Choice, rng: &mut R) -> TurnReport {
        let change = rng.gen_range(choice.change_range());
        let turn = self.turn;
        self.level = self.level.saturating_add(change);
        self.turn = self.turn.saturating_add(1);
        TurnReport {
            turn,
            choice,
            change,
            level: self.level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn parse_accepts_menu_digits_only() {
        assert_eq!(Choice::parse("1\n"), Choice::PlantTrees);
        assert_eq!(Choice::parse("2\r\n"), Choice::AwarenessCampaign);
        assert_eq!(Choice::parse("3"), Choice::MonitorEmissions);
        assert_eq!(Choice::parse("4"), Choice::Mismanagement);
        assert_eq!(Choice::parse(" 1"), Choice::Mismanagement);
        assert_eq!(Choice::parse(""), Choice::Mismanagement);
    }

    #[test]
    fn changes_stay_within_their_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for choice in [
            Choice::PlantTrees,
            Choice::AwarenessCampaign,
            Choice::MonitorEmissions,
            Choice::Mismanagement,
        ] {
            for _ in 0..200 {
                let mut game = Pollution::new();
                let report = game.play(choice, &mut rng);
                assert!(choice.change_range().contains(&report.change));
                assert_eq!(report.level, STARTING_POLLUTION + report.change);
                assert_eq!(report.turn, 1);
                assert_eq!(game.turn(), 2);
            }
        }
    }

    #[test]
    fn status_reflects_open_interval() {
        let game = |level| Pollution { level, turn: 1 };
        assert_eq!(game(1).status(), Status::Ongoing);
        assert_eq!(game(99).status(), Status::Ongoing);
        assert_eq!(game(0).status(), Status::Restored);
        assert_eq!(game(-4).status(), Status::Restored);
        assert_eq!(game(100).status(), Status::Collapsed);
    }
}
