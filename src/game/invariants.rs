//! Battle invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger in a correctly implemented battle. They are
//! bug detectors for tests and fuzz drivers, not gameplay limits.

use std::collections::HashSet;

use crate::game::battle::Battle;
use crate::game::unit::{Side, Unit};
use crate::game::Cell;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all battle invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(battle: &Battle) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    check_units(battle, battle.heroes(), Cell::Hero, &mut violations);
    check_units(battle, battle.enemies(), Cell::Enemy, &mut violations);

    // No two live units share a cell.
    let mut occupied = HashSet::new();
    for unit in battle.heroes().iter().chain(battle.enemies()) {
        if !occupied.insert(unit.pos) {
            violations.push(InvariantViolation {
                message: format!("two live units share cell {:?}", unit.pos),
            });
        }
    }

    // Every unit marker on the grid belongs to some live unit.
    for (coord, cell) in battle.grid().cells() {
        let units: &[Unit] = match cell {
            Cell::Hero => battle.heroes(),
            Cell::Enemy => battle.enemies(),
            _ => continue,
        };
        if !units.iter().any(|u| u.pos == coord) {
            violations.push(InvariantViolation {
                message: format!("stale {cell:?} marker at {coord:?}"),
            });
        }
    }

    // Turn state is coherent for a running battle.
    let turn = battle.turn();
    if !battle.is_over() && !battle.heroes().is_empty() {
        if turn.current >= battle.heroes().len() {
            violations.push(InvariantViolation {
                message: format!(
                    "current index {} out of range for party of {}",
                    turn.current,
                    battle.heroes().len()
                ),
            });
        } else if turn.move_points > battle.heroes()[turn.current].agility {
            violations.push(InvariantViolation {
                message: format!(
                    "move points {} exceed active hero agility {}",
                    turn.move_points,
                    battle.heroes()[turn.current].agility
                ),
            });
        }
    }

    violations
}

/// Per-unit checks: alive, in bounds, mirrored on the grid.
fn check_units(
    battle: &Battle,
    units: &[Unit],
    marker: Cell,
    violations: &mut Vec<InvariantViolation>,
) {
    for unit in units {
        if !unit.is_alive() {
            violations.push(InvariantViolation {
                message: format!("{} is in the active list with hp {}", unit.name, unit.hp),
            });
        }
        match battle.grid().get(unit.pos) {
            Some(cell) if cell == marker => {}
            Some(cell) => violations.push(InvariantViolation {
                message: format!(
                    "{} at {:?} sits on a {cell:?} cell, expected {marker:?}",
                    unit.name, unit.pos
                ),
            }),
            None => violations.push(InvariantViolation {
                message: format!("{} is out of bounds at {:?}", unit.name, unit.pos),
            }),
        }
        let expected_side = if marker == Cell::Hero {
            Side::Hero
        } else {
            Side::Enemy
        };
        if unit.side != expected_side {
            violations.push(InvariantViolation {
                message: format!("{} has side {:?} in the {marker:?} list", unit.name, unit.side),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::unit::UnitSpec;
    use crate::levelgen::LevelConfig;

    #[test]
    fn test_fresh_battle_holds() {
        let config = LevelConfig {
            rows: 6,
            cols: 6,
            wall_hp: 20,
            enemies: vec![UnitSpec {
                name: "gob".to_string(),
                symbol: 'g',
                x: 3,
                y: 3,
                attack: 2,
                range: 1,
                hp: 10,
                agility: 1,
                bonuses: Vec::new(),
            }],
            generate_enemies: false,
            layout: None,
        };
        let party = vec![Unit::from_spec(
            &UnitSpec {
                name: "a".to_string(),
                symbol: '@',
                x: 0,
                y: 0,
                attack: 4,
                range: 1,
                hp: 20,
                agility: 2,
                bonuses: Vec::new(),
            },
            Side::Hero,
        )];
        let battle = Battle::new(&config, party).unwrap();
        assert!(check_invariants(&battle).is_empty());
    }
}
