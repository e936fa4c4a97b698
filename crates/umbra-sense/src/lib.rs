//! Perception fields for Umbra levels.
//!
//! Two per-cell layers sit on top of a level's [`Grid`](umbra_space::Grid):
//!
//! - [`VisibilityMap`]: generation-stamped field of view. A cell is
//!   [`Visibility::Visible`] if stamped in the latest refresh,
//!   [`Visibility::Seen`] if stamped earlier, [`Visibility::Unseen`] if
//!   never.
//! - [`ScentField`]: a monotone scalar trail laid wherever the player can
//!   see, read by pursuers through [`ScentField::track`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod scent;
pub mod visibility;

pub use scent::{ScentCandidate, ScentField};
pub use visibility::{update_vision, Visibility, VisibilityMap};
