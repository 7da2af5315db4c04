//! Output formatting utilities for CLI.

// Aggregate statistics accept f64 precision loss
#![allow(clippy::cast_precision_loss)]

use rampart::autoplay::{BattleOutcome, BattleReport};
use rampart::levelgen::LevelConfig;
use rampart::summit::{RoundOutcome, SummitSim};
use serde::Serialize;

/// JSON-serializable battle report.
#[derive(Debug, Serialize)]
pub(super) struct JsonBattleReport {
    /// Level seed used.
    pub(super) seed: u32,
    /// Terminal condition.
    pub(super) outcome: BattleOutcome,
    /// Full party rounds taken.
    pub(super) turns: u32,
    /// Wall hit points left.
    pub(super) wall_hp_left: i32,
    /// Heroes alive at the end.
    pub(super) survivors: usize,
    /// Log lines.
    pub(super) events: Vec<String>,
}

impl JsonBattleReport {
    /// Create from a battle report.
    pub(super) fn from_report(seed: u32, report: &BattleReport) -> Self {
        Self {
            seed,
            outcome: report.outcome,
            turns: report.turns,
            wall_hp_left: report.wall_hp_left,
            survivors: report.survivors,
            events: report.events.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Format a battle report as human-readable text.
pub(super) fn format_battle_text(seed: u32, report: &BattleReport, quiet: bool) -> String {
    let mut output = String::new();

    if !quiet {
        for event in &report.events {
            output.push_str(&format!("{event}\n"));
        }
        output.push('\n');
    }

    output.push_str(&format!("Battle Result (seed: {seed})\n"));
    let outcome = match report.outcome {
        BattleOutcome::WallDown => "wall destroyed",
        BattleOutcome::PartyWiped => "party wiped",
        BattleOutcome::TurnLimit => "turn limit reached",
    };
    output.push_str(&format!("  Outcome: {outcome}\n"));
    output.push_str(&format!("  Turns: {}\n", report.turns));
    output.push_str(&format!("  Wall HP left: {}\n", report.wall_hp_left));
    output.push_str(&format!("  Survivors: {}\n", report.survivors));

    output
}

/// Format a level configuration as human-readable text.
pub(super) fn format_level_text(seed: u32, level: &LevelConfig) -> String {
    let mut output = String::new();

    output.push_str(&format!("Level (seed: {seed})\n"));
    output.push_str(&format!("  Grid: {}x{}\n", level.rows, level.cols));
    output.push_str(&format!("  Wall HP: {}\n", level.wall_hp));
    output.push_str(&format!("  Enemies: {}\n", level.enemies.len()));
    for enemy in &level.enemies {
        output.push_str(&format!(
            "    {} '{}' at ({}, {}): atk {}, rng {}, hp {}, agi {}\n",
            enemy.name, enemy.symbol, enemy.x, enemy.y, enemy.attack, enemy.range, enemy.hp,
            enemy.agility
        ));
    }

    output
}

/// JSON-serializable summit result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSummitResult {
    /// Placement seed used.
    pub(super) seed: u32,
    /// Rounds simulated.
    pub(super) rounds: u32,
    /// Winning team index (null on deadlock or cap).
    pub(super) winner: Option<usize>,
    /// Whether the melee deadlocked.
    pub(super) deadlock: bool,
    /// Log lines.
    pub(super) events: Vec<String>,
}

impl JsonSummitResult {
    /// Create from a finished simulation.
    pub(super) fn from_sim(seed: u32, sim: &SummitSim, outcome: RoundOutcome) -> Self {
        let winner = match outcome {
            RoundOutcome::Victory { team } => Some(team),
            RoundOutcome::Continue | RoundOutcome::Deadlock => None,
        };
        Self {
            seed,
            rounds: sim.rounds(),
            winner,
            deadlock: outcome == RoundOutcome::Deadlock,
            events: sim.events().iter().map(ToString::to_string).collect(),
        }
    }
}

/// Format a summit result as human-readable text.
pub(super) fn format_summit_text(seed: u32, sim: &SummitSim, outcome: RoundOutcome) -> String {
    let mut output = String::new();

    for event in sim.events() {
        output.push_str(&format!("{event}\n"));
    }
    output.push('\n');

    output.push_str(&format!("Summit Result (seed: {seed})\n"));
    match outcome {
        RoundOutcome::Victory { team } => {
            let name = sim
                .units()
                .iter()
                .find(|u| u.team == team)
                .map_or("unknown", |u| u.name.as_str());
            output.push_str(&format!("  Winner: team {team} ({name})\n"));
        }
        RoundOutcome::Deadlock => output.push_str("  Winner: none (deadlock)\n"),
        RoundOutcome::Continue => output.push_str("  Winner: none (round cap)\n"),
    }
    output.push_str(&format!("  Rounds: {}\n", sim.rounds()));

    output
}

/// Batch statistics for aggregated autoplay results.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct BatchStats {
    /// Total battles played.
    pub(super) games_played: u64,
    /// Battles won by destroying the wall.
    pub(super) wall_down: u64,
    /// Battles lost to a party wipe.
    pub(super) party_wiped: u64,
    /// Battles stopped by the turn cap.
    pub(super) turn_limit: u64,
    /// Total turns across all battles.
    total_turns: u64,
    /// Total surviving heroes across all battles.
    total_survivors: u64,
}

impl BatchStats {
    /// Create empty stats.
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Add one battle report to the stats.
    pub(super) fn add_report(&mut self, report: &BattleReport) {
        self.games_played += 1;
        self.total_turns += u64::from(report.turns);
        self.total_survivors += report.survivors as u64;
        match report.outcome {
            BattleOutcome::WallDown => self.wall_down += 1,
            BattleOutcome::PartyWiped => self.party_wiped += 1,
            BattleOutcome::TurnLimit => self.turn_limit += 1,
        }
    }

    /// Merge another accumulator into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.wall_down += other.wall_down;
        self.party_wiped += other.party_wiped;
        self.turn_limit += other.turn_limit;
        self.total_turns += other.total_turns;
        self.total_survivors += other.total_survivors;
    }

    /// Win rate (0.0-1.0).
    pub(super) fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wall_down as f64 / self.games_played as f64
    }

    /// Average battle length in turns.
    pub(super) fn avg_turns(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games_played as f64
    }

    /// Average surviving heroes per battle.
    pub(super) fn avg_survivors(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_survivors as f64 / self.games_played as f64
    }
}

/// JSON-serializable batch result.
#[derive(Debug, Serialize, Clone, Copy)]
pub(super) struct JsonBatchResult {
    /// Total battles played.
    games_played: u64,
    /// Battles won by destroying the wall.
    wall_down: u64,
    /// Battles lost to a party wipe.
    party_wiped: u64,
    /// Battles stopped by the turn cap.
    turn_limit: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average battle length in turns.
    avg_turns: f64,
    /// Average surviving heroes per battle.
    avg_survivors: f64,
}

impl JsonBatchResult {
    /// Create from accumulated stats.
    pub(super) fn from_stats(stats: &BatchStats) -> Self {
        Self {
            games_played: stats.games_played,
            wall_down: stats.wall_down,
            party_wiped: stats.party_wiped,
            turn_limit: stats.turn_limit,
            win_rate: stats.win_rate(),
            avg_turns: stats.avg_turns(),
            avg_survivors: stats.avg_survivors(),
        }
    }
}

/// Format batch stats as human-readable text.
pub(super) fn format_batch_text(stats: &BatchStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("Batch Results ({} battles)\n", stats.games_played));
    output.push_str("========================================\n\n");

    output.push_str(&format!(
        "  Wall destroyed: {} ({:.1}%)\n",
        stats.wall_down,
        stats.win_rate() * 100.0
    ));
    output.push_str(&format!("  Party wiped: {}\n", stats.party_wiped));
    output.push_str(&format!("  Turn limit: {}\n\n", stats.turn_limit));

    output.push_str(&format!("Average Battle Length: {:.1} turns\n", stats.avg_turns()));
    output.push_str(&format!("Average Survivors: {:.2}\n", stats.avg_survivors()));

    output
}

/// Format batch stats as CSV.
pub(super) fn format_batch_csv(stats: &BatchStats) -> String {
    let mut output = String::new();

    // Header
    output.push_str("games,wall_down,party_wiped,turn_limit,win_rate,avg_turns,avg_survivors\n");
    output.push_str(&format!(
        "{},{},{},{},{:.4},{:.2},{:.2}\n",
        stats.games_played,
        stats.wall_down,
        stats.party_wiped,
        stats.turn_limit,
        stats.win_rate(),
        stats.avg_turns(),
        stats.avg_survivors()
    ));

    output
}
