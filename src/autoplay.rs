//! Scripted battle driver: plays a generated level with a greedy policy.
//!
//! Used by the CLI `run` and `batch` commands and by integration tests that
//! need whole battles without a human in the loop. The policy is
//! deliberately simple: shoot whatever some direction hits, otherwise walk
//! toward the wall, otherwise forfeit the turn.

use std::time::Duration;

use serde::Serialize;

use crate::error::LevelError;
use crate::game::{
    trace_shot, Battle, BattleEvent, BattleSignal, BonusStat, Dir, Shot, Side, Unit, UnitSpec,
};
use crate::levelgen;

/// Knobs for an autoplay run.
#[derive(Debug, Clone, Copy)]
pub struct AutoplayConfig {
    /// Stop after this many full party rounds.
    pub max_turns: u32,
    /// Pacing delay between attack resolution and turn advancement.
    pub pacing: Duration,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            max_turns: 200,
            pacing: Duration::ZERO,
        }
    }
}

/// How an autoplay battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    /// The wall collapsed; the level was won.
    WallDown,
    /// Every hero died.
    PartyWiped,
    /// The turn cap expired with the wall still standing.
    TurnLimit,
}

/// Summary of one driven battle.
#[derive(Debug, Clone)]
pub struct BattleReport {
    /// Terminal condition.
    pub outcome: BattleOutcome,
    /// Full party rounds taken.
    pub turns: u32,
    /// Wall hit points left (0 on collapse).
    pub wall_hp_left: i32,
    /// Heroes still alive at the end.
    pub survivors: usize,
    /// Everything the battle logged.
    pub events: Vec<BattleEvent>,
}

/// The standard four-hero roster.
///
/// The names matter: mode-up rules key on them.
#[must_use]
pub fn default_party() -> Vec<UnitSpec> {
    vec![
        UnitSpec {
            name: "Ashfall".to_string(),
            symbol: 'A',
            x: 0,
            y: 0,
            attack: 6,
            range: 3,
            hp: 25,
            agility: 2,
            bonuses: Vec::new(),
        },
        UnitSpec {
            name: "Granite".to_string(),
            symbol: 'G',
            x: 0,
            y: 1,
            attack: 3,
            range: 1,
            hp: 40,
            agility: 2,
            bonuses: vec![(BonusStat::Armor, 1)],
        },
        UnitSpec {
            name: "Willow".to_string(),
            symbol: 'W',
            x: 0,
            y: 2,
            attack: 2,
            range: 2,
            hp: 22,
            agility: 2,
            bonuses: vec![(BonusStat::Heal, 2)],
        },
        UnitSpec {
            name: "Comet".to_string(),
            symbol: 'C',
            x: 0,
            y: 3,
            attack: 4,
            range: 2,
            hp: 20,
            agility: 3,
            bonuses: vec![(BonusStat::Yeet, 1)],
        },
    ]
}

/// Generate the level for `seed` and drive it to a terminal condition.
///
/// # Errors
///
/// Returns a [`LevelError`] when the generated level cannot hold the party
/// (which the generator's ranges make effectively impossible) or when the
/// party is empty.
pub fn run_battle(
    seed: u32,
    party: &[UnitSpec],
    config: &AutoplayConfig,
) -> Result<BattleReport, LevelError> {
    let level = levelgen::generate(seed);
    let units: Vec<Unit> = party
        .iter()
        .map(|spec| Unit::from_spec(spec, Side::Hero))
        .collect();
    let mut battle = Battle::new(&level, units)?;
    battle.set_pacing(config.pacing);

    let outcome = drive(&mut battle, config.max_turns);
    Ok(BattleReport {
        outcome,
        turns: battle.turns_taken(),
        wall_hp_left: battle.wall_hp().max(0),
        survivors: battle.heroes().len(),
        events: battle.drain_events(),
    })
}

/// Step the greedy policy until the battle resolves or the cap expires.
fn drive(battle: &mut Battle, max_turns: u32) -> BattleOutcome {
    while battle.turns_taken() < max_turns {
        let Some(hero) = battle.active_hero() else {
            return BattleOutcome::PartyWiped;
        };
        let (from, range) = (hero.pos, hero.range);

        let shot_dir = Dir::ALL.into_iter().find(|&dir| {
            matches!(
                trace_shot(battle.grid(), from, dir, range),
                Shot::Unit {
                    side: Side::Enemy,
                    ..
                } | Shot::Wall { .. }
            )
        });

        let signal = if let Some(dir) = shot_dir {
            battle.arm_attack();
            battle.attack_in_direction(dir)
        } else if battle.turn().move_points > 0 {
            advance_toward_wall(battle)
        } else {
            battle.end_turn()
        };

        match signal {
            BattleSignal::LevelComplete => return BattleOutcome::WallDown,
            BattleSignal::GameOver => return BattleOutcome::PartyWiped,
            BattleSignal::None => {}
        }
    }
    BattleOutcome::TurnLimit
}

/// Try to close distance to the wall column on the right; a boxed-in hero
/// forfeits the turn instead of spinning.
fn advance_toward_wall(battle: &mut Battle) -> BattleSignal {
    let before = battle.turn();
    for dir in [Dir::Right, Dir::Down, Dir::Up, Dir::Left] {
        let signal = battle.move_unit(dir);
        if signal != BattleSignal::None || battle.turn() != before {
            return signal;
        }
    }
    battle.end_turn()
}
