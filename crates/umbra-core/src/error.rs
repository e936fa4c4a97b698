//! Error types shared across the Umbra workspace.
//!
//! Two families live here: [`InvariantViolation`], which signals a bug in
//! the core and is reported rather than propagated, and
//! [`SchedulerError`], the terminal conditions of the turn scheduler.

use std::error::Error;
use std::fmt;

use crate::geom::Position;
use crate::id::ActorId;

/// A broken internal invariant.
///
/// Violations never reach the presentation layer. They are handed to
/// [`report_invariant`], which aborts debug builds and logs in release
/// builds; the caller then clamps the offending state and continues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A second actor was about to be placed on an occupied tile.
    DoubleOccupancy {
        /// The contested tile.
        pos: Position,
        /// The actor already standing there.
        occupant: ActorId,
        /// The actor that tried to move in.
        intruder: ActorId,
    },
    /// An actor's energy exceeded its configured maximum.
    EnergyOverflow {
        /// The offending actor.
        actor: ActorId,
        /// The energy it would have held.
        energy: i32,
        /// The configured maximum.
        max: i32,
    },
    /// An actor's health exceeded its maximum.
    HealthOverflow {
        /// The offending actor.
        actor: ActorId,
        /// The health it would have held.
        health: i32,
        /// Its maximum health.
        max: i32,
    },
    /// A scheduler cursor pointed past the end of the actor list.
    CursorOverrun {
        /// Which cursor overran.
        cursor: &'static str,
        /// The cursor value.
        index: usize,
        /// The actor list length.
        len: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DoubleOccupancy {
                pos,
                occupant,
                intruder,
            } => write!(
                f,
                "actor {intruder} placed on {pos} already occupied by {occupant}"
            ),
            Self::EnergyOverflow { actor, energy, max } => {
                write!(f, "actor {actor} energy {energy} exceeds max {max}")
            }
            Self::HealthOverflow { actor, health, max } => {
                write!(f, "actor {actor} health {health} exceeds max {max}")
            }
            Self::CursorOverrun { cursor, index, len } => {
                write!(f, "{cursor} cursor {index} overran actor list of {len}")
            }
        }
    }
}

impl Error for InvariantViolation {}

/// Report a broken invariant.
///
/// Logs at `error` level, then panics when debug assertions are enabled.
/// In release builds this returns normally and the caller is expected to
/// clamp the state it was about to corrupt.
pub fn report_invariant(violation: InvariantViolation) {
    log::error!("invariant violated: {violation}");
    debug_assert!(false, "invariant violated: {violation}");
}

/// Terminal conditions of the turn scheduler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchedulerError {
    /// No actor can ever become eligible to act, so the scheduler would
    /// spin forever.
    Starved {
        /// Number of actors on the schedule.
        actors: usize,
        /// Consecutive slots that resolved without any action.
        idle_slots: usize,
    },
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Starved { actors: 0, .. } => write!(f, "scheduler starved: no actors"),
            Self::Starved { actors, idle_slots } => write!(
                f,
                "scheduler starved: {idle_slots} idle slots across {actors} actors"
            ),
        }
    }
}

impl Error for SchedulerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starved_display_distinguishes_empty_schedule() {
        let empty = SchedulerError::Starved {
            actors: 0,
            idle_slots: 0,
        };
        assert_eq!(empty.to_string(), "scheduler starved: no actors");
        let stuck = SchedulerError::Starved {
            actors: 2,
            idle_slots: 9,
        };
        assert!(stuck.to_string().contains("9 idle slots"));
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "invariant violated"))]
    fn report_invariant_panics_only_in_debug() {
        report_invariant(InvariantViolation::CursorOverrun {
            cursor: "action",
            index: 3,
            len: 2,
        });
    }
}
