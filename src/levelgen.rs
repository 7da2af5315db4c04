//! Deterministic seeded level generation.
//!
//! `generate` is a pure function of the seed: the PRNG stream and the draw
//! order below are part of the contract, so the same seed yields a
//! byte-identical level on every run and platform.

// Generation uses intentional narrowing casts for ranged draws
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::game::UnitSpec;

/// Deterministic PRNG using xorshift32.
///
/// 32-bit on purpose: the generation contract promises a reproducible
/// 32-bit stream seeded exactly by the level seed.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Rng32 {
    state: u32,
}

impl Rng32 {
    /// Create a new RNG with the given seed.
    pub(crate) const fn new(seed: u32) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555 } else { seed };
        Self { state }
    }

    /// Generate the next random u32.
    pub(crate) const fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Generate a random value in `[0, max)`.
    pub(crate) const fn next_below(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }
}

/// Fixed enemy symbol alphabet for generated levels.
const ENEMY_SYMBOLS: [char; 6] = ['g', 'o', 's', 'w', 'b', 'r'];

/// Base name for each generated enemy symbol.
const fn symbol_name(symbol: char) -> &'static str {
    match symbol {
        'g' => "gob",
        'o' => "ogre",
        's' => "shade",
        'w' => "wisp",
        'b' => "brute",
        _ => "raider",
    }
}

/// A complete level configuration: grid shape, wall strength, and the
/// opposing force.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Grid rows.
    pub rows: u16,
    /// Grid columns.
    pub cols: u16,
    /// Hit points of the destructible wall.
    pub wall_hp: i32,
    /// Explicit enemy list; ignored when `generate_enemies` is set.
    #[serde(default)]
    pub enemies: Vec<UnitSpec>,
    /// Ask the battle to pull enemies from a generator instead of the list.
    /// Without a generator supplied at battle construction this degrades to
    /// an empty enemy list.
    #[serde(default)]
    pub generate_enemies: bool,
    /// Optional explicit layout, one string per row: `.` empty, `#` wall,
    /// `R` rock. When absent the wall occupies the rightmost column.
    #[serde(default)]
    pub layout: Option<Vec<String>>,
}

impl LevelConfig {
    /// Save this configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::Io`] on file errors.
    pub fn save(&self, path: &Path) -> Result<(), LevelError> {
        let file = File::create(path).map_err(|e| LevelError::Io(e.to_string()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .map_err(|e| LevelError::Io(e.to_string()))
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::Io`] on file errors and [`LevelError::Parse`]
    /// on malformed JSON.
    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let file = File::open(path).map_err(|e| LevelError::Io(e.to_string()))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| LevelError::Parse(e.to_string()))
    }
}

/// Generate a level configuration from a seed.
///
/// Draw order (fixed, part of the determinism contract): rows (5-15),
/// cols (5-15), wall HP (20-219), enemy count (1-5), then per enemy:
/// symbol, attack (1-10), range (1-2), hp (10-59), agility (1-3),
/// x (0..cols), y (0..rows).
#[must_use]
pub fn generate(seed: u32) -> LevelConfig {
    let mut rng = Rng32::new(seed);

    let rows = 5 + rng.next_below(11) as u16;
    let cols = 5 + rng.next_below(11) as u16;
    let wall_hp = 20 + rng.next_below(200) as i32;
    let enemy_count = 1 + rng.next_below(5);

    let mut enemies = Vec::with_capacity(enemy_count as usize);
    for i in 0..enemy_count {
        let symbol = ENEMY_SYMBOLS[rng.next_below(ENEMY_SYMBOLS.len() as u32) as usize];
        let attack = 1 + rng.next_below(10) as i32;
        let range = 1 + rng.next_below(2) as u16;
        let hp = 10 + rng.next_below(50) as i32;
        let agility = 1 + rng.next_below(3) as u16;
        let x = rng.next_below(u32::from(cols)) as u16;
        let y = rng.next_below(u32::from(rows)) as u16;

        enemies.push(UnitSpec {
            name: format!("{} {}", symbol_name(symbol), i + 1),
            symbol,
            x,
            y,
            attack,
            range,
            hp,
            agility,
            bonuses: Vec::new(),
        });
    }

    LevelConfig {
        rows,
        cols,
        wall_hp,
        enemies,
        generate_enemies: false,
        layout: None,
    }
}
