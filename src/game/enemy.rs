//! Enemy turn: greedy pathing toward the nearest hero plus adjacent strikes.

use std::cmp::Ordering;

use crate::game::event::BattleEvent;
use crate::game::status::sweep_dead;
use crate::game::unit::Unit;
use crate::game::{Cell, Dir, Grid};

/// Run the full enemy turn: every enemy moves up to its agility in
/// single-cell steps toward the nearest living hero, then strikes every
/// orthogonally adjacent hero. Dead heroes are swept immediately so later
/// enemies neither target nor strike them.
pub(crate) fn enemy_phase(
    grid: &mut Grid,
    heroes: &mut Vec<Unit>,
    enemies: &mut [Unit],
    events: &mut Vec<BattleEvent>,
) {
    for idx in 0..enemies.len() {
        if heroes.is_empty() {
            return;
        }
        chase(grid, heroes, &mut enemies[idx]);
        strike_adjacent(grid, heroes, &enemies[idx], events);
    }
}

/// Move one enemy up to `agility` cells toward the nearest hero.
fn chase(grid: &mut Grid, heroes: &[Unit], enemy: &mut Unit) {
    for _ in 0..enemy.agility {
        let Some(target) = nearest_hero(heroes, enemy) else {
            return;
        };

        let dx = i32::from(target.x) - i32::from(enemy.pos.x);
        let dy = i32::from(target.y) - i32::from(enemy.pos.y);
        let (first, second) = preferred_steps(dx, dy);

        let stepped = [first, second].into_iter().flatten().any(|dir| {
            let Some(dest) = enemy.pos.step(dir) else {
                return false;
            };
            if !grid.is_empty(dest) {
                return false;
            }
            grid.clear(enemy.pos);
            grid.set(dest, Cell::Enemy);
            enemy.pos = dest;
            true
        });

        // Both axes blocked: the enemy stays put, and nothing changes
        // before the next sub-step would.
        if !stepped {
            return;
        }
    }
}

/// Position of the living hero with minimum Manhattan distance, first-found
/// on ties.
fn nearest_hero(heroes: &[Unit], enemy: &Unit) -> Option<crate::game::Coord> {
    let mut best: Option<(u32, crate::game::Coord)> = None;
    for hero in heroes {
        let dist = hero.pos.manhattan(enemy.pos);
        if best.is_none_or(|(d, _)| dist < d) {
            best = Some((dist, hero.pos));
        }
    }
    best.map(|(_, pos)| pos)
}

/// Step preference toward a delta: the axis with the greater absolute delta
/// first (x on ties), the perpendicular axis as the fallback.
fn preferred_steps(dx: i32, dy: i32) -> (Option<Dir>, Option<Dir>) {
    let x_dir = match dx.cmp(&0) {
        Ordering::Greater => Some(Dir::Right),
        Ordering::Less => Some(Dir::Left),
        Ordering::Equal => None,
    };
    let y_dir = match dy.cmp(&0) {
        Ordering::Greater => Some(Dir::Down),
        Ordering::Less => Some(Dir::Up),
        Ordering::Equal => None,
    };

    if dx.abs() >= dy.abs() {
        (x_dir, y_dir)
    } else {
        (y_dir, x_dir)
    }
}

/// Strike every hero orthogonally adjacent to this enemy, sweeping the dead
/// at once.
fn strike_adjacent(
    grid: &mut Grid,
    heroes: &mut Vec<Unit>,
    enemy: &Unit,
    events: &mut Vec<BattleEvent>,
) {
    let mut any_down = false;
    for dir in Dir::ALL {
        let Some(adjacent) = enemy.pos.step(dir) else {
            continue;
        };
        if let Some(hero) = heroes.iter_mut().find(|h| h.pos == adjacent) {
            let damage = hero.absorb(enemy.attack);
            hero.hp -= damage;
            events.push(BattleEvent::EnemyStrike {
                enemy: enemy.name.clone(),
                hero: hero.name.clone(),
                damage,
            });
            any_down |= !hero.is_alive();
        }
    }
    if any_down {
        sweep_dead(heroes, grid, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::unit::{BonusStat, Side, UnitSpec};
    use crate::game::Coord;

    fn unit(name: &str, side: Side, x: u16, y: u16, attack: i32, agility: u16, hp: i32) -> Unit {
        Unit::from_spec(
            &UnitSpec {
                name: name.to_string(),
                symbol: if side == Side::Hero { '@' } else { 'g' },
                x,
                y,
                attack,
                range: 1,
                hp,
                agility,
                bonuses: Vec::new(),
            },
            side,
        )
    }

    fn place_all(grid: &mut Grid, heroes: &[Unit], enemies: &[Unit]) {
        for hero in heroes {
            grid.set(hero.pos, Cell::Hero);
        }
        for enemy in enemies {
            grid.set(enemy.pos, Cell::Enemy);
        }
    }

    #[test]
    fn test_preferred_axis() {
        assert_eq!(preferred_steps(3, 1), (Some(Dir::Right), Some(Dir::Down)));
        assert_eq!(preferred_steps(-1, -4), (Some(Dir::Up), Some(Dir::Left)));
        // Exact tie prefers the x axis.
        assert_eq!(preferred_steps(2, -2), (Some(Dir::Right), Some(Dir::Up)));
        assert_eq!(preferred_steps(0, 2), (Some(Dir::Down), None));
    }

    #[test]
    fn test_enemy_walks_toward_nearest_hero() {
        let mut grid = Grid::new(8, 8).unwrap();
        let mut heroes = vec![unit("far", Side::Hero, 7, 7, 1, 1, 20)];
        heroes.push(unit("near", Side::Hero, 4, 0, 1, 1, 20));
        let mut enemies = vec![unit("g", Side::Enemy, 0, 0, 2, 2, 10)];
        place_all(&mut grid, &heroes, &enemies);
        let mut events = Vec::new();

        enemy_phase(&mut grid, &mut heroes, &mut enemies, &mut events);

        // Two steps along x toward the nearer hero at (4, 0).
        assert_eq!(enemies[0].pos, Coord::new(2, 0));
        assert_eq!(grid.get(Coord::new(2, 0)), Some(Cell::Enemy));
        assert!(grid.is_empty(Coord::new(0, 0)));
    }

    #[test]
    fn test_blocked_preferred_axis_falls_back() {
        let mut grid = Grid::new(8, 8).unwrap();
        let mut heroes = vec![unit("h", Side::Hero, 3, 1, 1, 1, 20)];
        let mut enemies = vec![unit("g", Side::Enemy, 0, 0, 2, 1, 10)];
        place_all(&mut grid, &heroes, &enemies);
        grid.set(Coord::new(1, 0), Cell::Rock);
        let mut events = Vec::new();

        enemy_phase(&mut grid, &mut heroes, &mut enemies, &mut events);

        // Preferred x step into the rock fails; perpendicular y succeeds.
        assert_eq!(enemies[0].pos, Coord::new(0, 1));
    }

    #[test]
    fn test_fully_blocked_enemy_stays() {
        let mut grid = Grid::new(8, 8).unwrap();
        let mut heroes = vec![unit("h", Side::Hero, 3, 3, 1, 1, 20)];
        let mut enemies = vec![unit("g", Side::Enemy, 0, 0, 2, 3, 10)];
        place_all(&mut grid, &heroes, &enemies);
        grid.set(Coord::new(1, 0), Cell::Rock);
        grid.set(Coord::new(0, 1), Cell::Rock);
        let mut events = Vec::new();

        enemy_phase(&mut grid, &mut heroes, &mut enemies, &mut events);

        assert_eq!(enemies[0].pos, Coord::new(0, 0));
    }

    #[test]
    fn test_strike_applies_armor() {
        let mut grid = Grid::new(8, 8).unwrap();
        let mut heroes = vec![unit("h", Side::Hero, 1, 0, 1, 1, 20)];
        heroes[0].bonuses.add(BonusStat::Armor, 2);
        let mut enemies = vec![unit("g", Side::Enemy, 0, 0, 5, 0, 10)];
        place_all(&mut grid, &heroes, &enemies);
        let mut events = Vec::new();

        enemy_phase(&mut grid, &mut heroes, &mut enemies, &mut events);

        assert_eq!(heroes[0].hp, 17);
    }

    #[test]
    fn test_dead_hero_not_struck_twice() {
        let mut grid = Grid::new(8, 8).unwrap();
        let mut heroes = vec![unit("h", Side::Hero, 1, 0, 1, 1, 4)];
        let mut enemies = vec![
            unit("g1", Side::Enemy, 0, 0, 5, 0, 10),
            unit("g2", Side::Enemy, 2, 0, 5, 0, 10),
        ];
        place_all(&mut grid, &heroes, &enemies);
        let mut events = Vec::new();

        enemy_phase(&mut grid, &mut heroes, &mut enemies, &mut events);

        assert!(heroes.is_empty());
        let strikes = events
            .iter()
            .filter(|e| matches!(e, BattleEvent::EnemyStrike { .. }))
            .count();
        assert_eq!(strikes, 1);
        assert!(grid.is_empty(Coord::new(1, 0)));
    }
}
