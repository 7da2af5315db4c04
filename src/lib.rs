// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Rampart: a deterministic grid-based tactical combat simulator.
//!
//! This crate provides a turn-based battle engine designed for:
//! - Bit-exact deterministic simulation (seeded levels, fixed turn order)
//! - A hero party assaulting enemy waves and a destructible wall
//! - An autonomous battle-royale variant (summit mode)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Autoplay / Summit Drivers       │
//! ├─────────────────────────────────────┤
//! │     Battle (turn scheduler)         │
//! ├─────────────────────────────────────┤
//! │   Grid / Units / Combat / Status    │
//! └─────────────────────────────────────┘
//! ```

pub mod autoplay;
pub mod error;
pub mod game;
pub mod levelgen;
pub mod summit;

pub use error::LevelError;

// Re-export key game types at crate root for convenience
pub use game::{
    Battle, BattleEvent, BattleSignal, Cell, Coord, Dir, Grid, Side, Unit, UnitSpec,
};
pub use levelgen::LevelConfig;
