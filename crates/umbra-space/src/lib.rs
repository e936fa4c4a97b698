//! Spatial storage for Umbra levels.
//!
//! This crate owns everything that is purely about the shape and content
//! of a level grid:
//!
//! - [`Extent`]: width/height, bounds checks and row-major indexing,
//!   shared by every per-cell layer (tiles, visibility, scent).
//! - [`Grid`]: the tile store with terrain, occupancy and items.
//! - [`plot_line`]: octant-normalised, direction-symmetric line plotting
//!   used by the visibility engine.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod extent;
pub mod grid;
pub mod line;
pub mod tile;

pub use error::SpaceError;
pub use extent::Extent;
pub use grid::Grid;
pub use line::{plot_line, plot_line_into, Octant};
pub use tile::{Tile, TileKind};
