//! Combat layer for Rampart.
//!
//! Implements the tactical battle rules:
//! - Battlefield grid with wall and rock cells
//! - Units (heroes, enemies) with status effects and bonus stats
//! - Ranged line-of-fire attacks and knockback
//! - The turn scheduler and enemy AI
//! - Mode-up party buffs

mod battle;
mod combat;
mod enemy;
mod event;
mod grid;
mod invariants;
mod knockback;
mod modeup;
mod status;
mod unit;

pub use battle::{Battle, BattleSignal, EnemyGenerator, TurnState};
pub use combat::{trace_shot, Shot};
pub use event::BattleEvent;
pub use grid::{Cell, Coord, Dir, Grid};
pub use invariants::{check_invariants, InvariantViolation};
pub use knockback::apply_knockback;
pub use modeup::{apply_buff, compute_buff, StatDelta};
pub use status::{sweep_dead, tick_unit, BurnState, SlujState, StatusBag};
pub use unit::{BonusStat, Bonuses, Side, Unit, UnitSpec};
