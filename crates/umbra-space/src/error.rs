//! Error types for grid construction and spatial queries.

use std::fmt;

use umbra_core::{ActorId, Position};

/// Errors arising from grid construction or point queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpaceError {
    /// A position lies outside the grid.
    OutOfBounds {
        /// The offending position.
        pos: Position,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// Attempted to construct a grid with zero cells.
    EmptySpace,
    /// A dimension exceeds the maximum representable coordinate.
    DimensionTooLarge {
        /// Which dimension.
        name: &'static str,
        /// The requested size.
        value: u32,
        /// The largest allowed size.
        max: u32,
    },
    /// No actor stands on the tile.
    Vacant {
        /// The empty tile.
        pos: Position,
    },
    /// The tile already holds another actor.
    Occupied {
        /// The contested tile.
        pos: Position,
        /// Its current occupant.
        by: ActorId,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, width, height } => {
                write!(f, "position {pos} out of bounds: [0, {width}) x [0, {height})")
            }
            Self::EmptySpace => write!(f, "grid must have at least one cell"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum {max}")
            }
            Self::Vacant { pos } => write!(f, "no actor stands on {pos}"),
            Self::Occupied { pos, by } => write!(f, "tile {pos} is occupied by {by}"),
        }
    }
}

impl std::error::Error for SpaceError {}
