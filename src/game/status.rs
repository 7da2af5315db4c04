//! Recurring status effects: burn and sluj.
//!
//! Effects tick once per tick boundary (after the party's turns and again
//! after the enemy turn). Damage is applied even if it takes a unit below
//! zero; removing dead units is a separate sweep in the same pass.

use crate::game::event::BattleEvent;
use crate::game::unit::Unit;
use crate::game::Grid;

/// Burn: fixed damage every tick for a fixed number of ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurnState {
    /// Damage dealt on each tick.
    pub damage_per_tick: i32,
    /// Ticks remaining; the effect is removed when this reaches zero.
    pub remaining: u32,
}

/// Sluj: damage on an interval that shortens with level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlujState {
    /// Affliction level; drives both damage and trigger interval.
    pub level: u32,
    /// Ticks remaining; decremented every tick whether or not damage fired.
    pub remaining: u32,
    /// Ticks elapsed since the affliction began.
    pub ticks: u32,
}

impl SlujState {
    /// Start a fresh affliction at the given level for `duration` ticks.
    #[must_use]
    pub const fn new(level: u32, duration: u32) -> Self {
        Self {
            level,
            remaining: duration,
            ticks: 0,
        }
    }

    /// Ticks between damage applications: `max(5 - level, 1)`.
    #[must_use]
    pub fn trigger_interval(&self) -> u32 {
        5_u32.saturating_sub(self.level).max(1)
    }
}

/// Per-unit bag of active status effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusBag {
    /// Active burn, if any.
    pub burn: Option<BurnState>,
    /// Active sluj, if any.
    pub sluj: Option<SlujState>,
}

/// Apply one tick of every active effect to a single unit.
///
/// Burn deals its damage and is removed in the tick its duration reaches
/// zero. Sluj counts ticks, deals `level * 2` only on its interval, and logs
/// its own expiry. Neither removes the unit; callers sweep afterwards.
pub fn tick_unit(unit: &mut Unit, events: &mut Vec<BattleEvent>) {
    if let Some(burn) = &mut unit.status.burn {
        if burn.remaining > 0 {
            unit.hp -= burn.damage_per_tick;
            burn.remaining -= 1;
            events.push(BattleEvent::BurnTick {
                name: unit.name.clone(),
                damage: burn.damage_per_tick,
            });
        }
        if burn.remaining == 0 {
            unit.status.burn = None;
        }
    }

    if let Some(sluj) = &mut unit.status.sluj {
        sluj.ticks += 1;
        if sluj.ticks % sluj.trigger_interval() == 0 {
            #[allow(clippy::cast_possible_wrap)]
            let damage = (sluj.level * 2) as i32;
            unit.hp -= damage;
            events.push(BattleEvent::SlujTick {
                name: unit.name.clone(),
                damage,
            });
        }
        sluj.remaining = sluj.remaining.saturating_sub(1);
        if sluj.remaining == 0 {
            events.push(BattleEvent::SlujExpired {
                name: unit.name.clone(),
            });
            unit.status.sluj = None;
        }
    }
}

/// Remove dead units from a collection, clearing their grid cells.
///
/// Returns the number of units removed. Emits one defeat event per unit;
/// that event is the only thing a dead unit still produces.
pub fn sweep_dead(units: &mut Vec<Unit>, grid: &mut Grid, events: &mut Vec<BattleEvent>) -> usize {
    let before = units.len();
    units.retain(|unit| {
        if unit.is_alive() {
            true
        } else {
            grid.clear(unit.pos);
            events.push(BattleEvent::Defeated {
                name: unit.name.clone(),
            });
            false
        }
    });
    before - units.len()
}
