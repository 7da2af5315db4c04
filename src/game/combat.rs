//! Ranged line-of-fire resolution.

use crate::game::unit::Side;
use crate::game::{Cell, Coord, Dir, Grid};

/// What a shot hit first, marching outward from the attacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shot {
    /// A unit stands in the line of fire.
    Unit {
        /// Which side the unit belongs to.
        side: Side,
        /// Where it stands.
        at: Coord,
    },
    /// A destructible wall segment.
    Wall {
        /// The wall cell hit.
        at: Coord,
    },
    /// An indestructible obstacle; the shot is wasted.
    Rock {
        /// The rock cell hit.
        at: Coord,
    },
    /// Nothing within range (including shots that leave the grid).
    Miss,
}

/// March from `from` along `dir` for up to `range` cells and report the
/// first thing encountered.
///
/// Pure over the grid; applying damage is the scheduler's job.
#[must_use]
pub fn trace_shot(grid: &Grid, from: Coord, dir: Dir, range: u16) -> Shot {
    for step in 1..=range {
        let Some(candidate) = from.step_by(dir, step) else {
            return Shot::Miss;
        };
        let Some(cell) = grid.get(candidate) else {
            return Shot::Miss;
        };
        match cell {
            Cell::Empty => {}
            Cell::Hero => {
                return Shot::Unit {
                    side: Side::Hero,
                    at: candidate,
                };
            }
            Cell::Enemy => {
                return Shot::Unit {
                    side: Side::Enemy,
                    at: candidate,
                };
            }
            Cell::Wall => return Shot::Wall { at: candidate },
            Cell::Rock => return Shot::Rock { at: candidate },
        }
    }
    Shot::Miss
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(cells: &[(u16, u16, Cell)]) -> Grid {
        let mut grid = Grid::new(8, 8).unwrap();
        for &(x, y, cell) in cells {
            grid.set(Coord::new(x, y), cell);
        }
        grid
    }

    #[test]
    fn test_first_enemy_stops_shot() {
        let grid = grid_with(&[(4, 2, Cell::Enemy), (5, 2, Cell::Enemy)]);
        let shot = trace_shot(&grid, Coord::new(1, 2), Dir::Right, 5);
        assert_eq!(
            shot,
            Shot::Unit {
                side: Side::Enemy,
                at: Coord::new(4, 2)
            }
        );
    }

    #[test]
    fn test_wall_before_enemy() {
        let grid = grid_with(&[(3, 2, Cell::Wall), (4, 2, Cell::Enemy)]);
        let shot = trace_shot(&grid, Coord::new(1, 2), Dir::Right, 5);
        assert_eq!(shot, Shot::Wall { at: Coord::new(3, 2) });
    }

    #[test]
    fn test_out_of_range_is_miss() {
        let grid = grid_with(&[(6, 2, Cell::Enemy)]);
        assert_eq!(trace_shot(&grid, Coord::new(1, 2), Dir::Right, 3), Shot::Miss);
    }

    #[test]
    fn test_shot_off_the_grid_is_miss() {
        let grid = grid_with(&[]);
        assert_eq!(trace_shot(&grid, Coord::new(1, 1), Dir::Up, 4), Shot::Miss);
        assert_eq!(trace_shot(&grid, Coord::new(6, 1), Dir::Right, 4), Shot::Miss);
    }

    #[test]
    fn test_rock_blocks() {
        let grid = grid_with(&[(2, 5, Cell::Rock), (2, 6, Cell::Enemy)]);
        let shot = trace_shot(&grid, Coord::new(2, 3), Dir::Down, 4);
        assert_eq!(shot, Shot::Rock { at: Coord::new(2, 5) });
    }

    #[test]
    fn test_friendly_unit_blocks() {
        let grid = grid_with(&[(3, 2, Cell::Hero), (4, 2, Cell::Enemy)]);
        let shot = trace_shot(&grid, Coord::new(1, 2), Dir::Right, 5);
        assert_eq!(
            shot,
            Shot::Unit {
                side: Side::Hero,
                at: Coord::new(3, 2)
            }
        );
    }

    #[test]
    fn test_zero_range_never_hits() {
        let grid = grid_with(&[(2, 3, Cell::Enemy)]);
        assert_eq!(trace_shot(&grid, Coord::new(2, 2), Dir::Down, 0), Shot::Miss);
    }
}
