//! Run command implementation.

use super::output::{format_battle_text, JsonBattleReport};
use super::{CliError, OutputFormat};
use rampart::autoplay::{default_party, run_battle, AutoplayConfig};
use std::time::Duration;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the battle fails to run.
pub(crate) fn execute(
    seed: Option<u32>,
    turns: u32,
    pacing: u64,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(super::generate::clock_seed);

    let config = AutoplayConfig {
        max_turns: turns,
        pacing: Duration::from_millis(pacing),
    };

    if !quiet && format == OutputFormat::Text {
        println!("Running battle with seed {seed}...");
        println!();
    }

    let report = run_battle(seed, &default_party(), &config)?;

    match format {
        OutputFormat::Text => {
            print!("{}", format_battle_text(seed, &report, quiet));
        }
        OutputFormat::Json => {
            let json_result = JsonBattleReport::from_report(seed, &report);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
