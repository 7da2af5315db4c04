//! Battlefield grid and coordinate types.

/// A coordinate on the battlefield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate.
    #[must_use]
    pub const fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) as u32 + self.y.abs_diff(other.y) as u32
    }

    /// The coordinate one cell in the given direction, or `None` if that
    /// would leave the non-negative quadrant. Grid bounds are checked
    /// separately by the caller.
    #[must_use]
    pub const fn step(self, dir: Dir) -> Option<Coord> {
        match dir {
            Dir::Up => {
                if self.y == 0 {
                    None
                } else {
                    Some(Coord::new(self.x, self.y - 1))
                }
            }
            Dir::Down => Some(Coord::new(self.x, self.y + 1)),
            Dir::Left => {
                if self.x == 0 {
                    None
                } else {
                    Some(Coord::new(self.x - 1, self.y))
                }
            }
            Dir::Right => Some(Coord::new(self.x + 1, self.y)),
        }
    }

    /// The coordinate `steps` cells in the given direction, or `None` on
    /// quadrant underflow.
    #[must_use]
    pub const fn step_by(self, dir: Dir, steps: u16) -> Option<Coord> {
        match dir {
            Dir::Up => {
                if self.y < steps {
                    None
                } else {
                    Some(Coord::new(self.x, self.y - steps))
                }
            }
            Dir::Down => Some(Coord::new(self.x, self.y + steps)),
            Dir::Left => {
                if self.x < steps {
                    None
                } else {
                    Some(Coord::new(self.x - steps, self.y))
                }
            }
            Dir::Right => Some(Coord::new(self.x + steps, self.y)),
        }
    }
}

/// An orthogonal direction on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    /// Toward smaller y.
    Up,
    /// Toward larger y.
    Down,
    /// Toward smaller x.
    Left,
    /// Toward larger x.
    Right,
}

impl Dir {
    /// All four directions in a fixed iteration order.
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];
}

/// Occupancy marker for a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Nothing here.
    #[default]
    Empty,
    /// Occupied by a living hero.
    Hero,
    /// Occupied by a living enemy.
    Enemy,
    /// Destructible wall segment (shared wall HP pool).
    Wall,
    /// Indestructible obstacle.
    Rock,
}

impl Cell {
    /// Whether this cell stops forced displacement and blocks movement
    /// without being a unit.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Cell::Wall | Cell::Rock)
    }
}

/// The battlefield: a rows×cols occupancy grid.
///
/// The grid mirrors unit positions; unit stats live on the unit lists owned
/// by the battle. A cell holds a unit marker iff exactly one living unit of
/// that side has that position.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: u16,
    cols: u16,
    /// Cells in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// Returns `None` if either dimension is zero.
    #[must_use]
    pub fn new(rows: u16, cols: u16) -> Option<Self> {
        if rows == 0 || cols == 0 {
            return None;
        }
        let size = usize::from(rows) * usize::from(cols);
        Some(Self {
            rows,
            cols,
            cells: vec![Cell::Empty; size],
        })
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> u16 {
        self.cols
    }

    /// Check if a coordinate is within the grid bounds.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.cols && coord.y < self.rows
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(usize::from(coord.y) * usize::from(self.cols) + usize::from(coord.x))
        } else {
            None
        }
    }

    /// Get the cell at a coordinate, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|idx| self.cells[idx])
    }

    /// Set the cell at a coordinate.
    ///
    /// Returns `false` when the coordinate is out of bounds.
    pub fn set(&mut self, coord: Coord, cell: Cell) -> bool {
        if let Some(idx) = self.index(coord) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Whether a coordinate is in bounds and empty.
    #[must_use]
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.get(coord) == Some(Cell::Empty)
    }

    /// Clear a cell back to empty.
    pub fn clear(&mut self, coord: Coord) {
        self.set(coord, Cell::Empty);
    }

    /// Iterate over all coordinates and cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let cols = self.cols;
        self.cells.iter().enumerate().map(move |(idx, &cell)| {
            #[allow(clippy::cast_possible_truncation)]
            let x = (idx % usize::from(cols)) as u16;
            #[allow(clippy::cast_possible_truncation)]
            let y = (idx / usize::from(cols)) as u16;
            (Coord::new(x, y), cell)
        })
    }

    /// First empty cell at or after `start` in row-major probe order.
    ///
    /// Used to resolve spawn collisions deterministically; wraps around the
    /// whole grid once before giving up.
    #[must_use]
    pub fn probe_empty(&self, start: Coord) -> Option<Coord> {
        let size = usize::from(self.rows) * usize::from(self.cols);
        let begin = self.index(start)?;
        (0..size)
            .map(|offset| (begin + offset) % size)
            .find(|&idx| self.cells[idx] == Cell::Empty)
            .map(|idx| {
                #[allow(clippy::cast_possible_truncation)]
                let x = (idx % usize::from(self.cols)) as u16;
                #[allow(clippy::cast_possible_truncation)]
                let y = (idx / usize::from(self.cols)) as u16;
                Coord::new(x, y)
            })
    }
}
