//! Generate command implementation.

use super::output::format_level_text;
use super::{CliError, OutputFormat};
use rampart::levelgen;
use std::path::PathBuf;

/// Execute the generate command.
///
/// # Errors
///
/// Returns an error if the config cannot be serialized or saved.
pub(crate) fn execute(
    seed: Option<u32>,
    format: OutputFormat,
    out: Option<PathBuf>,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(clock_seed);
    let level = levelgen::generate(seed);

    if let Some(path) = &out {
        level.save(path)?;
        println!("Level saved to: {}", path.display());
    }

    match format {
        OutputFormat::Text => {
            print!("{}", format_level_text(seed, &level));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&level)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}

/// Sub-second clock noise as a fallback seed when none is given.
pub(crate) fn clock_seed() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(42)
}
