//! Summit command implementation.

use super::output::{format_summit_text, JsonSummitResult};
use super::{CliError, OutputFormat};
use rampart::autoplay::default_party;
use rampart::summit::SummitSim;
use std::time::Duration;

/// Round cap for a CLI summit run; the map is 20x20, so anything still
/// unresolved by then is effectively stuck.
const MAX_ROUNDS: u32 = 10_000;

/// Execute the summit command.
///
/// # Errors
///
/// Returns an error if the result cannot be serialized.
pub(crate) fn execute(
    seed: Option<u32>,
    interval: u64,
    format: OutputFormat,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(super::generate::clock_seed);

    let mut sim = SummitSim::new(&default_party(), seed);
    let outcome = sim.run(Duration::from_millis(interval), MAX_ROUNDS);

    match format {
        OutputFormat::Text => {
            print!("{}", format_summit_text(seed, &sim, outcome));
        }
        OutputFormat::Json => {
            let json_result = JsonSummitResult::from_sim(seed, &sim, outcome);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
