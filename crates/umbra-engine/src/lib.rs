//! Turn scheduling, combat and monster AI for Umbra.
//!
//! The engine ties the spatial and perception crates together into a
//! playable [`World`]:
//!
//! - [`TurnScheduler`]: round-robin energy scheduling with separate
//!   action and energy cursors.
//! - [`resolver`]: movement classification and deterministic melee.
//! - [`ai`]: sight-then-scent pursuit for monsters.
//! - [`Level`]: a grid with its visibility map, scent field and stairs.
//!
//! A world is driven one slot at a time with [`World::tick`], or until
//! the player needs input with [`World::run_until_input`]. Every
//! gameplay notification is delivered synchronously to the sinks passed
//! to [`World::subscribe`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod actor;
pub mod ai;
pub mod config;
pub mod intent;
pub mod level;
pub mod resolver;
pub mod scheduler;
pub mod world;

pub use actor::{Actor, ActorKind, ActorTemplate, Behavior, Gauge};
pub use ai::{AiView, Decision};
pub use config::{
    CombatConfig, ConfigError, ScentConfig, SchedulerConfig, VisionConfig, WorldConfig,
};
pub use intent::{Intent, Menu};
pub use level::{Level, LevelError, Stair, StairDirection};
pub use resolver::{resolve_attack, try_move, AttackOutcome, MoveOutcome};
pub use scheduler::TurnScheduler;
pub use world::{Action, RunOutcome, SlotOutcome, SpawnError, World};
