//! Batch command implementation.

use super::output::{format_batch_csv, format_batch_text, BatchStats, JsonBatchResult};
use super::{BatchFormat, CliError};
use indicatif::{ProgressBar, ProgressStyle};
use rampart::autoplay::{default_party, run_battle, AutoplayConfig};
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Execute the batch command.
///
/// # Errors
///
/// Returns an error if the results cannot be serialized.
pub(crate) fn execute(
    games: u64,
    seed: Option<u32>,
    threads: Option<usize>,
    max_turns: u32,
    format: BatchFormat,
    progress: bool,
) -> Result<(), CliError> {
    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed.unwrap_or_else(super::generate::clock_seed);

    let config = AutoplayConfig {
        max_turns,
        pacing: Duration::ZERO,
    };
    let party = default_party();

    // Progress bar
    let pb = if progress {
        let pb = ProgressBar::new(games);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} battles ({per_sec})")
                .expect("valid template")
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Run battles in parallel using lock-free fold/reduce pattern.
    // Each thread accumulates into its own BatchStats, then we merge at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(BatchStats::new, |mut local_stats, i| {
            #[allow(clippy::cast_possible_truncation)]
            let game_seed = base_seed.wrapping_add(i as u32);

            if let Ok(report) = run_battle(game_seed, &party, &config) {
                local_stats.add_report(&report);
            }

            local_stats
        })
        .reduce(BatchStats::new, |mut a, b| {
            a.merge(&b);
            a
        });

    // Update progress bar after completion (no atomic overhead in hot path)
    if let Some(pb) = pb {
        pb.set_position(stats.games_played);
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    #[allow(clippy::cast_precision_loss)]
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        BatchFormat::Text => {
            println!();
            print!("{}", format_batch_text(&stats));
            println!();
            println!(
                "Duration: {:.2}s ({:.0} battles/sec)",
                duration.as_secs_f64(),
                games_per_sec
            );
        }
        BatchFormat::Json => {
            let json_result = JsonBatchResult::from_stats(&stats);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        BatchFormat::Csv => {
            print!("{}", format_batch_csv(&stats));
        }
    }

    Ok(())
}
