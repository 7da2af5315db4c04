//! Typed battle event log.
//!
//! The battle records everything that happens as structured events; callers
//! that want a plain text log use the `Display` rendering.

use std::fmt;

/// One thing that happened during a battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    /// A unit hit another unit.
    AttackHit {
        /// Attacker name.
        attacker: String,
        /// Target name.
        target: String,
        /// Damage dealt.
        damage: i32,
    },
    /// An attack hit the wall.
    WallHit {
        /// Attacker name.
        attacker: String,
        /// Damage dealt to the wall.
        damage: i32,
        /// Wall HP remaining after the hit (clamped at 0).
        remaining: i32,
    },
    /// The wall collapsed; the level is won.
    WallDown,
    /// An attack found nothing within range.
    Miss {
        /// Attacker name.
        attacker: String,
    },
    /// An attack was stopped by an indestructible obstacle.
    Blocked {
        /// Attacker name.
        attacker: String,
    },
    /// A unit died and was removed from the battle.
    Defeated {
        /// Name of the defeated unit.
        name: String,
    },
    /// Burn dealt its per-tick damage.
    BurnTick {
        /// Afflicted unit.
        name: String,
        /// Damage dealt.
        damage: i32,
    },
    /// Sluj triggered on its interval.
    SlujTick {
        /// Afflicted unit.
        name: String,
        /// Damage dealt.
        damage: i32,
    },
    /// A sluj affliction ran its course.
    SlujExpired {
        /// Previously afflicted unit.
        name: String,
    },
    /// A unit was knocked back.
    Knockback {
        /// Displaced unit.
        name: String,
        /// Cells actually travelled.
        cells: u16,
    },
    /// A knocked-back unit slammed into something.
    Collision {
        /// Colliding unit.
        name: String,
        /// Collision damage taken.
        damage: i32,
    },
    /// An enemy struck an adjacent hero.
    EnemyStrike {
        /// Enemy name.
        enemy: String,
        /// Hero name.
        hero: String,
        /// Damage dealt after armor.
        damage: i32,
    },
    /// The whole party was defeated.
    GameOver,
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::AttackHit {
                attacker,
                target,
                damage,
            } => write!(f, "{attacker} hits {target} for {damage}"),
            BattleEvent::WallHit {
                attacker,
                damage,
                remaining,
            } => write!(f, "{attacker} hits the wall for {damage} ({remaining} left)"),
            BattleEvent::WallDown => write!(f, "The wall collapses!"),
            BattleEvent::Miss { attacker } => write!(f, "{attacker} attacks thin air"),
            BattleEvent::Blocked { attacker } => {
                write!(f, "{attacker}'s attack is stopped by rock")
            }
            BattleEvent::Defeated { name } => write!(f, "{name} is defeated"),
            BattleEvent::BurnTick { name, damage } => {
                write!(f, "{name} burns for {damage}")
            }
            BattleEvent::SlujTick { name, damage } => {
                write!(f, "{name} takes {damage} sluj damage")
            }
            BattleEvent::SlujExpired { name } => write!(f, "The sluj on {name} wears off"),
            BattleEvent::Knockback { name, cells } => {
                write!(f, "{name} is knocked back {cells} cells")
            }
            BattleEvent::Collision { name, damage } => {
                write!(f, "{name} slams into an obstacle for {damage}")
            }
            BattleEvent::EnemyStrike {
                enemy,
                hero,
                damage,
            } => write!(f, "{enemy} strikes {hero} for {damage}"),
            BattleEvent::GameOver => write!(f, "The party has fallen"),
        }
    }
}
