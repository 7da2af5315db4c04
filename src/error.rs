//! Error types for level configuration and battle construction.

use std::fmt;

/// Errors building a battle from a level configuration, or loading one
/// from disk.
#[derive(Debug, Clone)]
pub enum LevelError {
    /// The party list was empty; a battle needs at least one hero.
    EmptyParty,
    /// Grid dimensions must both be non-zero.
    ZeroDimensions {
        /// Configured row count.
        rows: u16,
        /// Configured column count.
        cols: u16,
    },
    /// An explicit layout did not match the configured dimensions.
    LayoutShape {
        /// Expected number of rows.
        rows: u16,
        /// Expected number of columns per row.
        cols: u16,
    },
    /// An explicit layout contained an unknown cell symbol.
    LayoutSymbol {
        /// The offending character.
        symbol: char,
    },
    /// More units than free cells; placement probing found no room.
    Crowded,
    /// I/O failure reading or writing a config file.
    Io(String),
    /// A config file was not valid JSON for a level.
    Parse(String),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::EmptyParty => write!(f, "party is empty"),
            LevelError::ZeroDimensions { rows, cols } => {
                write!(f, "invalid dimensions {rows}x{cols} (must be > 0)")
            }
            LevelError::LayoutShape { rows, cols } => {
                write!(f, "layout does not match configured {rows}x{cols} grid")
            }
            LevelError::LayoutSymbol { symbol } => {
                write!(f, "unknown layout symbol {symbol:?}")
            }
            LevelError::Crowded => write!(f, "not enough free cells to place all units"),
            LevelError::Io(msg) => write!(f, "config i/o error: {msg}"),
            LevelError::Parse(msg) => write!(f, "config parse error: {msg}"),
        }
    }
}

impl std::error::Error for LevelError {}
