//! Summit mode: an autonomous battle-royale simulation.
//!
//! Every roster member starts as its own one-unit team on a fixed square
//! map. Rounds fire on a timer (or synchronously in tests via
//! [`SummitSim::round`]); defeat converts the loser to the winner's team at
//! full health instead of removing it, so teams merge until one remains.

use std::fmt;
use std::thread;
use std::time::Duration;

use crate::game::{Coord, UnitSpec};
use crate::levelgen::Rng32;

/// Side length of the fixed square summit map.
pub const SUMMIT_SIZE: u16 = 20;

/// Default hit points for roster entries that leave hp unset.
const DEFAULT_HP: i32 = 30;

/// A combatant in the summit simulation.
#[derive(Debug, Clone)]
pub struct SummitUnit {
    /// Display name.
    pub name: String,
    /// Current position on the summit map.
    pub pos: Coord,
    /// Team this unit currently fights for; starts as its own index.
    pub team: usize,
    /// Attack damage.
    pub attack: i32,
    /// Attack reach (defaults to 1).
    pub range: u16,
    /// Current hit points.
    pub hp: i32,
    /// Maximum hit points; restored in full on conversion.
    pub max_hp: i32,
}

/// Result of stepping one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum RoundOutcome {
    /// The melee continues.
    Continue,
    /// Every unit fights for this team; the simulation is over.
    Victory {
        /// Winning team index.
        team: usize,
    },
    /// A full round produced zero actions; the simulation is stuck.
    Deadlock,
}

/// One thing that happened during a summit round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummitEvent {
    /// A unit attacked an enemy.
    Strike {
        /// Attacker name.
        attacker: String,
        /// Target name.
        target: String,
        /// Damage dealt.
        damage: i32,
    },
    /// A defeated unit switched sides at full health.
    Converted {
        /// Converted unit name.
        name: String,
        /// Team it now fights for.
        team: usize,
    },
    /// A team absorbed everyone.
    Victory {
        /// Winning team index.
        team: usize,
    },
    /// The round produced zero actions.
    Deadlock,
}

impl fmt::Display for SummitEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummitEvent::Strike {
                attacker,
                target,
                damage,
            } => write!(f, "{attacker} strikes {target} for {damage}"),
            SummitEvent::Converted { name, team } => {
                write!(f, "{name} joins team {team}")
            }
            SummitEvent::Victory { team } => write!(f, "team {team} stands alone"),
            SummitEvent::Deadlock => write!(f, "nobody can act; the melee stalls"),
        }
    }
}

/// The summit battle-royale simulator.
#[derive(Debug, Clone)]
pub struct SummitSim {
    units: Vec<SummitUnit>,
    rounds: u32,
    events: Vec<SummitEvent>,
    finished: Option<RoundOutcome>,
}

impl SummitSim {
    /// Place the roster on the summit map.
    ///
    /// Positions are drawn from a seeded stream so a run is reproducible.
    /// Unset roster stats get defaults: 30 hp, range 1, attack at least 1.
    #[must_use]
    pub fn new(roster: &[UnitSpec], seed: u32) -> Self {
        let mut rng = Rng32::new(seed);
        let mut units: Vec<SummitUnit> = Vec::with_capacity(roster.len());

        for (team, spec) in roster.iter().enumerate() {
            let pos = draw_free_cell(&mut rng, &units);
            let hp = if spec.hp > 0 { spec.hp } else { DEFAULT_HP };
            units.push(SummitUnit {
                name: spec.name.clone(),
                pos,
                team,
                attack: spec.attack.max(1),
                range: if spec.range > 0 { spec.range } else { 1 },
                hp,
                max_hp: hp,
            });
        }

        Self {
            units,
            rounds: 0,
            events: Vec::new(),
            finished: None,
        }
    }

    /// All combatants.
    #[must_use]
    pub fn units(&self) -> &[SummitUnit] {
        &self.units
    }

    /// Rounds completed so far.
    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Everything logged so far.
    #[must_use]
    pub fn events(&self) -> &[SummitEvent] {
        &self.events
    }

    /// Step one round synchronously.
    ///
    /// Turn order is a snapshot of the units at round start; a unit
    /// defeated (converted) earlier in the round does not act. Returns a
    /// terminal outcome at most once; stepping a finished simulation just
    /// repeats it.
    pub fn round(&mut self) -> RoundOutcome {
        if let Some(outcome) = self.finished {
            return outcome;
        }

        let mut converted = vec![false; self.units.len()];
        let mut actions = 0u32;

        for idx in 0..self.units.len() {
            if converted[idx] {
                continue;
            }
            let me = self.units[idx].clone();

            let Some(target_idx) = self.nearest_enemy(me.team, me.pos) else {
                self.events.push(SummitEvent::Victory { team: me.team });
                self.finished = Some(RoundOutcome::Victory { team: me.team });
                return RoundOutcome::Victory { team: me.team };
            };

            let target_pos = self.units[target_idx].pos;
            if me.pos.manhattan(target_pos) <= u32::from(me.range) {
                let target = &mut self.units[target_idx];
                target.hp -= me.attack;
                actions += 1;
                self.events.push(SummitEvent::Strike {
                    attacker: me.name.clone(),
                    target: target.name.clone(),
                    damage: me.attack,
                });
                if target.hp <= 0 {
                    target.team = me.team;
                    target.hp = target.max_hp;
                    converted[target_idx] = true;
                    self.events.push(SummitEvent::Converted {
                        name: target.name.clone(),
                        team: me.team,
                    });
                }
            } else if let Some(dest) = self.step_toward(me.pos, target_pos) {
                self.units[idx].pos = dest;
                actions += 1;
            }
        }

        self.rounds += 1;
        if actions == 0 {
            self.events.push(SummitEvent::Deadlock);
            self.finished = Some(RoundOutcome::Deadlock);
            return RoundOutcome::Deadlock;
        }
        RoundOutcome::Continue
    }

    /// Drive rounds on a free-running interval until a terminal outcome or
    /// the round cap. The cap is the cancellation backstop; a zero interval
    /// skips the pacing sleep entirely.
    pub fn run(&mut self, interval: Duration, max_rounds: u32) -> RoundOutcome {
        for _ in 0..max_rounds {
            match self.round() {
                RoundOutcome::Continue => {
                    if !interval.is_zero() {
                        thread::sleep(interval);
                    }
                }
                outcome => return outcome,
            }
        }
        RoundOutcome::Continue
    }

    /// Index of the nearest unit on a different team, first-found on ties.
    fn nearest_enemy(&self, team: usize, from: Coord) -> Option<usize> {
        let mut best: Option<(u32, usize)> = None;
        for (idx, unit) in self.units.iter().enumerate() {
            if unit.team == team {
                continue;
            }
            let dist = from.manhattan(unit.pos);
            if best.is_none_or(|(d, _)| dist < d) {
                best = Some((dist, idx));
            }
        }
        best.map(|(_, idx)| idx)
    }

    /// One cell toward the target: larger absolute delta axis first, exact
    /// ties toward the x axis. `None` when the chosen cell is occupied or
    /// off the map.
    fn step_toward(&self, from: Coord, target: Coord) -> Option<Coord> {
        let dx = i32::from(target.x) - i32::from(from.x);
        let dy = i32::from(target.y) - i32::from(from.y);

        let dest = if dx.abs() >= dy.abs() {
            Coord::new(shift(from.x, dx), from.y)
        } else {
            Coord::new(from.x, shift(from.y, dy))
        };

        if dest == from || dest.x >= SUMMIT_SIZE || dest.y >= SUMMIT_SIZE {
            return None;
        }
        if self.units.iter().any(|u| u.pos == dest) {
            return None;
        }
        Some(dest)
    }
}

/// Move a coordinate component one step toward a delta's sign.
const fn shift(value: u16, delta: i32) -> u16 {
    if delta > 0 {
        value + 1
    } else if delta < 0 && value > 0 {
        value - 1
    } else {
        value
    }
}

/// Draw an unoccupied cell from the stream, falling back to a row-major
/// scan if the map is nearly full.
fn draw_free_cell(rng: &mut Rng32, taken: &[SummitUnit]) -> Coord {
    #[allow(clippy::cast_possible_truncation)]
    for _ in 0..1000 {
        let x = rng.next_below(u32::from(SUMMIT_SIZE)) as u16;
        let y = rng.next_below(u32::from(SUMMIT_SIZE)) as u16;
        let candidate = Coord::new(x, y);
        if !taken.iter().any(|u| u.pos == candidate) {
            return candidate;
        }
    }
    for y in 0..SUMMIT_SIZE {
        for x in 0..SUMMIT_SIZE {
            let candidate = Coord::new(x, y);
            if !taken.iter().any(|u| u.pos == candidate) {
                return candidate;
            }
        }
    }
    Coord::new(0, 0)
}
