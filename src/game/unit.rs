//! Unit model: heroes and enemies.

use serde::{Deserialize, Serialize};

use crate::game::status::StatusBag;
use crate::game::Coord;

/// Which side of the battle a unit fights on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Player-controlled party member.
    Hero,
    /// AI-controlled opponent.
    Enemy,
}

/// Sparse special stats a unit may carry.
///
/// A closed enum so combat and mode-up handling stay exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusStat {
    /// Extra targets per attack (data only; consumed by mode-up).
    Chain,
    /// Bonus outgoing attack damage.
    Rage,
    /// Healing power (marks the unit as a healer for mode-up).
    Heal,
    /// Flat reduction of incoming strike damage.
    Armor,
    /// Spore potency (data only; consumed by mode-up).
    Spore,
    /// Knockback distance applied to surviving attack targets.
    Yeet,
    /// Swarm count (data only; consumed by mode-up).
    Swarm,
}

impl BonusStat {
    /// All bonus kinds in a fixed order.
    pub const ALL: [BonusStat; 7] = [
        BonusStat::Chain,
        BonusStat::Rage,
        BonusStat::Heal,
        BonusStat::Armor,
        BonusStat::Spore,
        BonusStat::Yeet,
        BonusStat::Swarm,
    ];

    const fn index(self) -> usize {
        match self {
            BonusStat::Chain => 0,
            BonusStat::Rage => 1,
            BonusStat::Heal => 2,
            BonusStat::Armor => 3,
            BonusStat::Spore => 4,
            BonusStat::Yeet => 5,
            BonusStat::Swarm => 6,
        }
    }
}

/// Fixed-size bag of bonus stat values, indexed by [`BonusStat`].
///
/// Absent stats are simply zero, so "initialize before adding" is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bonuses {
    values: [i32; BonusStat::ALL.len()],
}

impl Bonuses {
    /// Current value for a bonus stat (0 when never granted).
    #[must_use]
    pub const fn get(&self, stat: BonusStat) -> i32 {
        self.values[stat.index()]
    }

    /// Add to a bonus stat.
    pub const fn add(&mut self, stat: BonusStat, amount: i32) {
        self.values[stat.index()] += amount;
    }
}

/// Serde-facing unit record used in level configurations and rosters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSpec {
    /// Display name.
    pub name: String,
    /// Single-character display symbol.
    pub symbol: char,
    /// Starting column.
    pub x: u16,
    /// Starting row.
    pub y: u16,
    /// Attack damage.
    pub attack: i32,
    /// Attack reach in cells.
    pub range: u16,
    /// Starting (and maximum) hit points.
    pub hp: i32,
    /// Move points per turn.
    pub agility: u16,
    /// Optional bonus stats, absent entries default to zero.
    #[serde(default)]
    pub bonuses: Vec<(BonusStat, i32)>,
}

/// A hero or enemy on the battlefield.
#[derive(Debug, Clone)]
pub struct Unit {
    /// Display name.
    pub name: String,
    /// Single-character display symbol.
    pub symbol: char,
    /// Which side this unit fights on.
    pub side: Side,
    /// Current position; mirrored on the grid while the unit lives.
    pub pos: Coord,
    /// Attack damage before bonuses.
    pub attack: i32,
    /// Attack reach in cells.
    pub range: u16,
    /// Move points per turn.
    pub agility: u16,
    /// Current hit points; may be transiently ≤ 0 between damage and sweep.
    pub hp: i32,
    /// Maximum hit points.
    pub max_hp: i32,
    /// Active recurring status effects.
    pub status: StatusBag,
    /// Sparse special stats.
    pub bonuses: Bonuses,
}

impl Unit {
    /// Build a unit from a spec record for the given side.
    #[must_use]
    pub fn from_spec(spec: &UnitSpec, side: Side) -> Self {
        let mut bonuses = Bonuses::default();
        for &(stat, amount) in &spec.bonuses {
            bonuses.add(stat, amount);
        }
        Self {
            name: spec.name.clone(),
            symbol: spec.symbol,
            side,
            pos: Coord::new(spec.x, spec.y),
            attack: spec.attack,
            range: spec.range,
            agility: spec.agility,
            hp: spec.hp,
            max_hp: spec.hp,
            status: StatusBag::default(),
            bonuses,
        }
    }

    /// Whether the unit is still alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Outgoing attack damage including the rage bonus.
    #[must_use]
    pub const fn strike_damage(&self) -> i32 {
        self.attack + self.bonuses.get(BonusStat::Rage)
    }

    /// Incoming strike damage after the armor bonus (never negative).
    #[must_use]
    pub fn absorb(&self, damage: i32) -> i32 {
        (damage - self.bonuses.get(BonusStat::Armor)).max(0)
    }
}
