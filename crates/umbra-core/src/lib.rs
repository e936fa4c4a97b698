//! Core types for the Umbra roguelike simulation core.
//!
//! This is the leaf crate of the workspace. It defines the vocabulary
//! shared by every other crate: strongly-typed IDs, grid geometry,
//! teams, the notification events raised during play, and the error
//! types that cross crate boundaries.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod event;
pub mod geom;
pub mod id;
pub mod team;

pub use error::{report_invariant, InvariantViolation, SchedulerError};
pub use event::{EventBus, EventSink, GameEvent};
pub use geom::{Direction, Position};
pub use id::{ActorId, Generation, ItemId, LevelId, TurnNumber};
pub use team::Team;
