//! Level dimensions and row-major indexing.

use smallvec::SmallVec;
use umbra_core::{Direction, Position};

use crate::error::SpaceError;

/// The width and height of a level.
///
/// Every per-cell layer of a level (tiles, visibility stamps, scent) is a
/// flat row-major buffer of `width * height` entries indexed through the
/// same `Extent`, so the layers can never disagree about shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Extent {
    width: u32,
    height: u32,
}

impl Extent {
    /// Largest allowed size of either dimension. Positions use `i32`.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create an extent.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if either dimension is 0, or
    /// `Err(SpaceError::DimensionTooLarge)` if either exceeds `i32::MAX`.
    pub fn new(width: u32, height: u32) -> Result<Self, SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptySpace);
        }
        if width > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether `pos` lies inside the extent.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    /// Row-major index of `pos`.
    pub fn index(&self, pos: Position) -> Result<usize, SpaceError> {
        if !self.contains(pos) {
            return Err(self.out_of_bounds(pos));
        }
        Ok(pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Position of a row-major index. `index` must be below `cell_count()`.
    pub fn position(&self, index: usize) -> Position {
        let w = self.width as usize;
        Position::new((index % w) as i32, (index / w) as i32)
    }

    /// The error describing `pos` as outside this extent.
    pub fn out_of_bounds(&self, pos: Position) -> SpaceError {
        SpaceError::OutOfBounds {
            pos,
            width: self.width,
            height: self.height,
        }
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cell_count()).map(move |i| self.position(i))
    }

    /// Positions in the square `center ± radius`, clamped to the extent,
    /// in row-major order. Empty when the square misses the extent.
    pub fn square_around(&self, center: Position, radius: i32) -> impl Iterator<Item = Position> {
        let radius = radius.max(0);
        let min_x = center.x.saturating_sub(radius).max(0);
        let min_y = center.y.saturating_sub(radius).max(0);
        let max_x = center.x.saturating_add(radius).min(self.width as i32 - 1);
        let max_y = center.y.saturating_add(radius).min(self.height as i32 - 1);
        (min_y..=max_y).flat_map(move |y| (min_x..=max_x).map(move |x| Position::new(x, y)))
    }

    /// In-bounds 8-connected neighbours of `pos`, in [`Direction::ALL`]
    /// order. Cells on the border have fewer neighbours.
    pub fn neighbours(&self, pos: Position) -> SmallVec<[Position; 8]> {
        Direction::ALL
            .into_iter()
            .map(|d| pos.step(d))
            .filter(|p| self.contains(*p))
            .collect()
    }
}
