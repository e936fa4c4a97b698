//! Grid geometry: positions and compass directions.

use std::fmt;
use std::ops::{Add, Sub};

/// A cell position on a level grid.
///
/// `x` grows eastwards and `y` grows southwards. Positions are plain
/// values; they may lie outside any grid, and bounds are checked by the
/// grid that interprets them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Position {
    /// Construct a position from its column and row.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position `(dx, dy)` away from this one.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The adjacent position in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        self.offset(dx, dy)
    }

    /// Chebyshev (L-inf) distance, the number of 8-connected steps
    /// between two cells on an open grid.
    pub fn chebyshev(self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Straight-line distance between cell centres.
    pub fn euclidean(self, other: Position) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }

    /// Direction of the single step from `self` to an adjacent `other`.
    ///
    /// Returns `None` when the cells are equal or not adjacent.
    pub fn direction_to(self, other: Position) -> Option<Direction> {
        let delta = other - self;
        Direction::ALL
            .into_iter()
            .find(|d| d.offset() == (delta.x, delta.y))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// One of the eight compass directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Towards row - 1.
    North = 0,
    /// Towards row + 1.
    South = 1,
    /// Towards column - 1.
    West = 2,
    /// Towards column + 1.
    East = 3,
    /// Diagonal north-west.
    NorthWest = 4,
    /// Diagonal north-east.
    NorthEast = 5,
    /// Diagonal south-west.
    SouthWest = 6,
    /// Diagonal south-east.
    SouthEast = 7,
}

impl Direction {
    /// All directions: cardinals first, then diagonals.
    ///
    /// This order is the tie-break order for every neighbourhood scan in
    /// the workspace.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// The `(dx, dy)` step for this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::NorthWest => (-1, -1),
            Direction::NorthEast => (1, -1),
            Direction::SouthWest => (-1, 1),
            Direction::SouthEast => (1, 1),
        }
    }

    /// The direction pointing the other way.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
            Direction::NorthWest => Direction::SouthEast,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::SouthEast => Direction::NorthWest,
        }
    }
}
