#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Eco Defender experience.

mod scene;
mod tuning;

use std::{cell::Cell, io, path::PathBuf, process::ExitCode, rc::Rc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use eco_defender_rendering::{Color, FieldPresentation, LoopControl, Presentation, RenderingBackend, Scene};
use eco_defender_rendering_macroquad::MacroquadBackend;
use eco_defender_simulation::{Outcome, Simulation};
use eco_defender_system_bootstrap::Bootstrap;
use eco_defender_system_pollution::run_session;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use self::scene::Legend;

/// Eco Defender: protect the city with trees, solar panels and recycling plants.
#[derive(Debug, Parser)]
#[command(name = "eco-defender", version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,
    #[command(flatten)]
    defend: DefendArgs,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Run the real-time tower defense game (default).
    Defend(DefendArgs),
    /// Play the turn-based pollution game on the terminal.
    Pollution(PollutionArgs),
}

#[derive(Debug, Args)]
struct DefendArgs {
    /// Seed for enemy lanes; drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file overriding gameplay constants.
    #[arg(long, value_name = "PATH")]
    tuning: Option<PathBuf>,
    /// Log the measured frame rate once per second.
    #[arg(long)]
    show_fps: bool,
}

#[derive(Debug, Args)]
struct PollutionArgs {
    /// Seed for pollution changes; drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

/// Entry point for the Eco Defender command-line interface.
fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.mode.unwrap_or(Mode::Defend(cli.defend)) {
        Mode::Defend(args) => defend(args),
        Mode::Pollution(args) => pollution(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("eco_defender_failed: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(rand::random);
    info!(seed, "seed_selected");
    seed
}

fn defend(args: DefendArgs) -> Result<()> {
    let tuning = tuning::load(args.tuning.as_deref())?;
    let legend = Legend::from_tuning(&tuning);
    let seed = resolve_seed(args.seed);
    let mut simulation = Simulation::new(tuning, seed).context("invalid tuning")?;

    let bootstrap = Bootstrap;
    info!(banner = bootstrap.welcome_banner(simulation.world()), "starting");
    let field = *bootstrap.field(simulation.world());
    let mut initial = Scene::new(FieldPresentation::new(field.width, field.height, Color::WHITE)?);
    scene::populate(&mut initial, simulation.world(), &legend);
    let presentation = Presentation::new("Eco Defender", field.frame_rate, initial)?;

    let game_over = Rc::new(Cell::new(false));
    let game_over_flag = Rc::clone(&game_over);
    MacroquadBackend::new()
        .with_show_fps(args.show_fps)
        .run(presentation, move |dt, input, frame| {
            let report = simulation.step(dt, &input.actions);
            scene::populate(frame, simulation.world(), &legend);
            match report.outcome {
                Outcome::Running => LoopControl::Continue,
                Outcome::GameOver => {
                    game_over_flag.set(true);
                    LoopControl::Exit
                }
            }
        })?;

    if game_over.get() {
        println!("Game Over!");
    }
    Ok(())
}

fn pollution(args: PollutionArgs) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(resolve_seed(args.seed));
    let status = run_session(io::stdin().lock(), io::stdout().lock(), &mut rng)
        .context("pollution session ended early")?;
    info!(?status, "pollution_finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_defends_with_top_level_flags() {
        let cli = Cli::try_parse_from(["eco-defender", "--seed", "9", "--show-fps"])
            .expect("valid arguments");

        assert!(cli.mode.is_none());
        assert_eq!(cli.defend.seed, Some(9));
        assert!(cli.defend.show_fps);
        assert!(cli.defend.tuning.is_none());
    }

    #[test]
    fn defend_subcommand_accepts_a_tuning_file() {
        let cli = Cli::try_parse_from(["eco-defender", "defend", "--tuning", "hard.toml"])
            .expect("valid arguments");

        let Some(Mode::Defend(args)) = cli.mode else {
            panic!("expected defend mode");
        };
        assert_eq!(args.tuning, Some(PathBuf::from("hard.toml")));
        assert_eq!(args.seed, None);
    }

    #[test]
    fn pollution_subcommand_takes_only_a_seed() {
        let cli = Cli::try_parse_from(["eco-defender", "pollution", "--seed", "3"])
            .expect("valid arguments");
        assert!(matches!(
            cli.mode,
            Some(Mode::Pollution(PollutionArgs { seed: Some(3) }))
        ));

        assert!(Cli::try_parse_from(["eco-defender", "pollution", "--show-fps"]).is_err());
    }
}
