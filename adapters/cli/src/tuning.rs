//! Loads gameplay constants from an optional TOML file.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use eco_defender_core::Tuning;
use tracing::info;

/// Reads and validates the tuning file at `path`, or returns the defaults.
pub(crate) fn load(path: Option<&Path>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {}", path.display()))?;
    let tuning =
        parse(&text).with_context(|| format!("failed to load tuning file {}", path.display()))?;
    info!(path = %path.display(), "tuning_loaded");
    Ok(tuning)
}

fn parse(text: &str) -> Result<Tuning> {
    let tuning: Tuning = toml::from_str(text).context("tuning file is not valid TOML")?;
    tuning.validate()?;
    Ok(tuning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, process};

    #[test]
    fn missing_path_yields_defaults() {
        assert_eq!(load(None).expect("defaults"), Tuning::default());
    }

    #[test]
    fn partial_file_overrides_named_keys() {
        let tuning = parse("[towers]\ntree_cost = 7.5\n").expect("valid tuning");
        assert_eq!(tuning.towers.tree_cost, 7.5);
        assert_eq!(tuning.towers.solar_cost, 10.0);
    }

    #[test]
    fn invalid_values_are_rejected_with_the_reason() {
        let error = parse("[field]\nframe_rate = 0\n").expect_err("zero frame rate");
        assert_eq!(error.to_string(), "frame rate must be positive");

        let error = parse("[field\n").expect_err("malformed toml");
        assert_eq!(error.to_string(), "tuning file is not valid TOML");
    }

    #[test]
    fn file_is_read_from_disk() {
        let path = env::temp_dir().join(format!("eco-defender-tuning-{}.toml", process::id()));
        fs::write(&path, "[enemies]\nhealth = 9\n").expect("temp file is writable");

        let loaded = load(Some(&path));
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.expect("valid file").enemies.health, 9);
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let path = Path::new("/definitely/not/here/tuning.toml");
        let error = load(Some(path)).expect_err("missing file");
        assert!(format!("{error:#}").contains("/definitely/not/here/tuning.toml"));
    }
}
