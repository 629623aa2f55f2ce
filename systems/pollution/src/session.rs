//! Console front-end that plays a pollution game over any reader/writer pair.

use std::io::{self, BufRead, Write};

use rand::Rng;
use thiserror::Error;

use crate::{Choice, Pollution, Status};

/// Banner printed before the first turn.
pub const INTRO_BANNER: &str = "\
===================================
       Welcome to Eco Defender     
===================================
Your mission is to protect the environment
from harmful pollution and industrial damage.
Make wise choices to keep nature safe.
";

const MENU: &str = "\
Choose your action:
1. Plant trees to reduce pollution.
2. Launch an awareness campaign.
3. Monitor industrial emissions.";

const PROMPT: &str = "Enter your choice (1-3): ";
const RESTORED_MESSAGE: &str = "Congratulations! You have successfully restored the environment!";
const COLLAPSED_MESSAGE: &str =
    "Oh no! Pollution has reached critical levels. The environment has suffered greatly.";

/// Failures that stop a console session early.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading input or writing output failed.
    #[error("console i/o failed")]
    Io(#[from] io::Error),
    /// Input ended while the game was still running.
    #[error("input closed during turn {turn}")]
    InputClosed {
        /// Turn that was waiting for a choice.
        turn: u32,
    },
}

/// Plays a full game, reading one choice per line from `input`.
///
/// Returns the final status, which is never [`Status::Ongoing`].
pub fn run_session<R, W, G>(mut input: R, mut output: W, rng: &mut G) -> Result<Status, SessionError>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    writeln!(output, "{INTRO_BANNER}")?;

    let mut game = Pollution::new();
    let mut line = String::new();
    while game.status() == Status::Ongoing {
        writeln!(output, "--- Turn {} ---", game.turn())?;
        writeln!(output, "Current pollution level: {}", game.level())?;
        writeln!(output, "{MENU}")?;
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(SessionError::InputClosed { turn: game.turn() });
        }

        let report = game.play(Choice::parse(&line), rng);
        writeln!(output, "{}", report.choice.message())?;
        writeln!(output)?;
    }

    let status = game.status();
    let closing = if status == Status::Restored {
        RESTORED_MESSAGE
    } else {
        COLLAPSED_MESSAGE
    };
    writeln!(output, "{closing}")?;
    output.flush()?;

    Ok(status)
}
