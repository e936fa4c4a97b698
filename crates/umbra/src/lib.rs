//! Umbra: a deterministic roguelike simulation core.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Umbra sub-crates. Presentation layers (terminal, graphical, or
//! headless test drivers) usually only need `umbra`.
//!
//! # Quick start
//!
//! ```rust
//! use umbra::prelude::*;
//!
//! let grid = Grid::new(8, 8, TileKind::Floor).unwrap();
//! let config = WorldConfig::default();
//! let level = Level::new(LevelId(0), grid, &config.scent, Vec::new()).unwrap();
//! let mut world = World::new(config, level).unwrap();
//!
//! let hero = world
//!     .spawn_player(LevelId(0), Position::new(1, 1), &ActorTemplate::new("hero", 20))
//!     .unwrap();
//! world
//!     .spawn_monster(LevelId(0), Position::new(6, 6), &ActorTemplate::new("goblin", 6))
//!     .unwrap();
//!
//! assert_eq!(world.run_until_input(), Ok(RunOutcome::AwaitingInput(hero)));
//! world.queue_input(Intent::Move(Direction::East));
//! assert_eq!(world.run_until_input(), Ok(RunOutcome::AwaitingInput(hero)));
//!
//! assert_eq!(world.actor(hero).unwrap().pos(), Position::new(2, 1));
//! assert_eq!(world.visibility_at(Position::new(6, 6)), Ok(Visibility::Visible));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `umbra-core` | IDs, geometry, teams, events, shared errors |
//! | [`space`] | `umbra-space` | Tile grid, extents, symmetric line plotting |
//! | [`sense`] | `umbra-sense` | Field of view and scent trails |
//! | [`engine`] | `umbra-engine` | Actors, scheduler, combat, AI, the world |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types shared by every crate (`umbra-core`).
///
/// Contains [`types::Position`], [`types::Direction`], the ID newtypes,
/// [`types::GameEvent`] and the [`types::EventSink`] trait.
pub use umbra_core as types;

/// Tile storage and line plotting (`umbra-space`).
///
/// [`space::Grid`] owns terrain, occupancy and items; [`space::plot_line`]
/// draws the rays used for vision.
pub use umbra_space as space;

/// Perception layers (`umbra-sense`).
///
/// [`sense::VisibilityMap`] with [`sense::update_vision`], and the
/// [`sense::ScentField`] monsters follow.
pub use umbra_sense as sense;

/// Simulation (`umbra-engine`).
///
/// [`engine::World`] drives everything; [`engine::TurnScheduler`] and the
/// [`engine::resolver`] functions are usable on their own.
pub use umbra_engine as engine;

/// Common imports for typical Umbra usage.
///
/// ```rust
/// use umbra::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use umbra_core::{
        ActorId, Direction, EventSink, GameEvent, ItemId, LevelId, Position, SchedulerError, Team,
        TurnNumber,
    };

    // Space
    pub use umbra_space::{Extent, Grid, SpaceError, Tile, TileKind};

    // Sense
    pub use umbra_sense::{ScentField, Visibility, VisibilityMap};

    // Engine
    pub use umbra_engine::{
        Action, Actor, ActorKind, ActorTemplate, Intent, Level, Menu, RunOutcome, SlotOutcome,
        Stair, StairDirection, World, WorldConfig,
    };
}
