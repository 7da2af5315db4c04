//! Mode-up: permanent party-wide stat buffs keyed by a chosen hero.

use crate::game::unit::{BonusStat, Unit};

/// A stat increase to apply to every party member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatDelta {
    /// Attack damage increase.
    pub attack: i32,
    /// Agility (move point) increase.
    pub agility: i32,
    /// Attack range increase.
    pub range: i32,
    /// Maximum hit point increase.
    pub max_hp: i32,
    /// Current hit point increase; only applied to units with hp > 0.
    pub hp: i32,
    /// Bonus stat increases.
    pub bonuses: Vec<(BonusStat, i32)>,
}

/// Compute the party-wide buff granted by choosing `hero` at `level`.
///
/// Named heroes have hard-coded rules scaled by level; unenumerated heroes
/// with healing power grant a heal buff; anyone else grants the flat
/// catch-all `+1` rage.
#[must_use]
pub fn compute_buff(hero: &Unit, level: i32) -> StatDelta {
    match hero.name.as_str() {
        "Ashfall" => StatDelta {
            attack: 2 * level,
            ..StatDelta::default()
        },
        "Granite" => StatDelta {
            max_hp: 5 * level,
            hp: 5 * level,
            bonuses: vec![(BonusStat::Armor, level)],
            ..StatDelta::default()
        },
        "Comet" => StatDelta {
            agility: level,
            bonuses: vec![(BonusStat::Yeet, level)],
            ..StatDelta::default()
        },
        _ if hero.bonuses.get(BonusStat::Heal) > 0 => StatDelta {
            bonuses: vec![(BonusStat::Heal, level)],
            ..StatDelta::default()
        },
        _ => StatDelta {
            bonuses: vec![(BonusStat::Rage, 1)],
            ..StatDelta::default()
        },
    }
}

/// Apply a buff to the whole party.
///
/// Every member receives the stat fields; the HP field only lands on units
/// with hp > 0. Bonus stats a unit never had start from zero.
pub fn apply_buff(delta: &StatDelta, party: &mut [Unit]) {
    for unit in party.iter_mut() {
        unit.attack += delta.attack;
        unit.agility = clamped_add(unit.agility, delta.agility);
        unit.range = clamped_add(unit.range, delta.range);
        unit.max_hp += delta.max_hp;
        if unit.hp > 0 {
            unit.hp += delta.hp;
        }
        for &(stat, amount) in &delta.bonuses {
            unit.bonuses.add(stat, amount);
        }
    }
}

/// Add a signed delta to an unsigned stat, flooring at zero.
fn clamped_add(base: u16, delta: i32) -> u16 {
    u16::try_from((i32::from(base) + delta).max(0)).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::unit::{Side, UnitSpec};

    fn hero(name: &str, bonuses: Vec<(BonusStat, i32)>) -> Unit {
        Unit::from_spec(
            &UnitSpec {
                name: name.to_string(),
                symbol: '@',
                x: 0,
                y: 0,
                attack: 4,
                range: 1,
                hp: 20,
                agility: 2,
                bonuses,
            },
            Side::Hero,
        )
    }

    #[test]
    fn test_named_rule_scales_with_level() {
        let chosen = hero("Ashfall", Vec::new());
        assert_eq!(compute_buff(&chosen, 1).attack, 2);
        assert_eq!(compute_buff(&chosen, 3).attack, 6);
    }

    #[test]
    fn test_healer_fallback() {
        let chosen = hero("Willow", vec![(BonusStat::Heal, 2)]);
        let delta = compute_buff(&chosen, 4);
        assert_eq!(delta.bonuses, vec![(BonusStat::Heal, 4)]);
        assert_eq!(delta.attack, 0);
    }

    #[test]
    fn test_catch_all_is_flat() {
        let chosen = hero("Drifter", Vec::new());
        let delta = compute_buff(&chosen, 9);
        assert_eq!(delta.bonuses, vec![(BonusStat::Rage, 1)]);
    }

    #[test]
    fn test_apply_buff_whole_party() {
        let chosen = hero("Granite", Vec::new());
        let delta = compute_buff(&chosen, 2);
        let mut party = vec![hero("Granite", Vec::new()), hero("Willow", Vec::new())];

        apply_buff(&delta, &mut party);

        for unit in &party {
            assert_eq!(unit.max_hp, 30);
            assert_eq!(unit.hp, 30);
            assert_eq!(unit.bonuses.get(BonusStat::Armor), 2);
        }
    }

    #[test]
    fn test_hp_skips_downed_units() {
        let delta = StatDelta {
            max_hp: 5,
            hp: 5,
            ..StatDelta::default()
        };
        let mut party = vec![hero("a", Vec::new()), hero("b", Vec::new())];
        party[1].hp = 0;

        apply_buff(&delta, &mut party);

        assert_eq!(party[0].hp, 25);
        assert_eq!(party[1].hp, 0);
        assert_eq!(party[1].max_hp, 25);
    }

    #[test]
    fn test_agility_floors_at_zero() {
        let delta = StatDelta {
            agility: -5,
            ..StatDelta::default()
        };
        let mut party = vec![hero("a", Vec::new())];
        apply_buff(&delta, &mut party);
        assert_eq!(party[0].agility, 0);
    }
}
