//! Rampart CLI - Command-line interface for running tactical battles.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Rampart - A deterministic grid tactical combat simulator
#[derive(Parser, Debug)]
#[command(name = "rampart")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Autoplay a single seeded battle
    Run {
        /// Level seed (default: random)
        #[arg(short, long)]
        seed: Option<u32>,

        /// Maximum party rounds (default: 200)
        #[arg(short, long, default_value = "200")]
        turns: u32,

        /// Pacing delay per attack in milliseconds (default: 0)
        #[arg(long, default_value = "0")]
        pacing: u64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress the event log, print only the summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate a level configuration from a seed
    Generate {
        /// Level seed (default: random)
        #[arg(short, long)]
        seed: Option<u32>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save the configuration as JSON
        #[arg(short, long)]
        out: Option<std::path::PathBuf>,
    },

    /// Run a battle-royale summit simulation to completion
    Summit {
        /// Placement seed (default: random)
        #[arg(short, long)]
        seed: Option<u32>,

        /// Round interval in milliseconds (default: 0)
        #[arg(short, long, default_value = "0")]
        interval: u64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Run mass parallel battles and aggregate statistics
    Batch {
        /// Number of battles to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each battle)
        #[arg(short, long)]
        seed: Option<u32>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Maximum party rounds per battle (default: 200)
        #[arg(short = 't', long, default_value = "200")]
        max_turns: u32,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::BatchFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            seed,
            turns,
            pacing,
            format,
            quiet,
        } => cli::run::execute(seed, turns, pacing, format, quiet),

        Commands::Generate { seed, format, out } => cli::generate::execute(seed, format, out),

        Commands::Summit {
            seed,
            interval,
            format,
        } => cli::summit::execute(seed, interval, format),

        Commands::Batch {
            games,
            seed,
            threads,
            max_turns,
            format,
            progress,
        } => cli::batch::execute(games, seed, threads, max_turns, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
