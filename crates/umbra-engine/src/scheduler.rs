//! Round-robin energy scheduler.
//!
//! The scheduler owns the ordered actor list of the active level and two
//! cursors into it:
//!
//! - the **action cursor** names the actor whose slot is being resolved;
//! - the **energy cursor** trails it by at most one and marks which
//!   actors already received this turn's energy grant.
//!
//! When the action cursor arrives at an actor whose index equals the
//! energy cursor, that actor is due its grant and the energy cursor
//! steps past it. Running off the end of the list wraps both cursors to
//! zero and completes a world turn. The scheduler only tracks order and
//! cursors; energy itself lives on the actors and is applied by the
//! world.

use umbra_core::{report_invariant, ActorId, InvariantViolation, SchedulerError};

use crate::config::SchedulerConfig;

/// Ordered actor list plus action and energy cursors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnScheduler {
    order: Vec<ActorId>,
    action_cursor: usize,
    energy_cursor: usize,
    idle_slots: usize,
}

impl TurnScheduler {
    /// An empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// A schedule over `actors` in the given order, cursors at zero.
    pub fn from_roster(actors: impl IntoIterator<Item = ActorId>) -> Self {
        Self {
            order: actors.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Scheduled actors in slot order.
    pub fn actors(&self) -> &[ActorId] {
        &self.order
    }

    /// Number of scheduled actors.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nobody is scheduled.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Index of the slot being resolved.
    pub fn action_cursor(&self) -> usize {
        self.action_cursor
    }

    /// Index of the next actor due an energy grant.
    pub fn energy_cursor(&self) -> usize {
        self.energy_cursor
    }

    /// Consecutive slots skipped without anyone acting.
    pub fn idle_slots(&self) -> usize {
        self.idle_slots
    }

    /// Actor under the action cursor.
    pub fn current(&self) -> Option<ActorId> {
        self.order.get(self.action_cursor).copied()
    }

    /// Whether `id` is scheduled.
    pub fn contains(&self, id: ActorId) -> bool {
        self.order.contains(&id)
    }

    /// Append an actor. It receives energy when the energy cursor
    /// reaches it, this turn if the cursor has not yet passed the end.
    pub fn push(&mut self, id: ActorId) {
        if !self.contains(id) {
            self.order.push(id);
        }
    }

    /// Unschedule `id`. Cursors past the removed slot shift back by one
    /// so no remaining actor is skipped or granted twice. Returns whether
    /// the actor was scheduled.
    pub fn remove(&mut self, id: ActorId) -> bool {
        let Some(index) = self.order.iter().position(|a| *a == id) else {
            return false;
        };
        self.order.remove(index);
        if index < self.action_cursor {
            self.action_cursor -= 1;
        }
        if index < self.energy_cursor {
            self.energy_cursor -= 1;
        }
        true
    }

    /// If the actor under the action cursor is due its energy grant,
    /// mark it granted and return it.
    pub fn take_grant(&mut self) -> Option<ActorId> {
        if self.action_cursor != self.energy_cursor {
            return None;
        }
        let id = self.current()?;
        self.energy_cursor += 1;
        Some(id)
    }

    /// Move the action cursor to the next slot. Returns `true` when this
    /// ran off the end of the list and wrapped both cursors to zero,
    /// completing a world turn.
    pub fn advance(&mut self) -> bool {
        if self.order.is_empty() {
            return self.wrap_if_done();
        }
        self.action_cursor += 1;
        self.wrap_if_done()
    }

    /// Wrap both cursors if the action cursor has reached the end of the
    /// list, which removals can also cause. Returns whether it wrapped.
    pub fn wrap_if_done(&mut self) -> bool {
        self.check_cursors();
        if self.action_cursor < self.order.len() {
            return false;
        }
        self.action_cursor = 0;
        self.energy_cursor = 0;
        true
    }

    /// Record a slot that resolved without any action. Fails once more
    /// consecutive idle slots have passed than the energy economy could
    /// ever need to make someone eligible.
    pub fn note_idle(&mut self, config: &SchedulerConfig) -> Result<(), SchedulerError> {
        self.idle_slots += 1;
        if self.idle_slots > config.idle_limit(self.order.len()) {
            return Err(self.starved());
        }
        Ok(())
    }

    /// Record that an actor acted.
    pub fn note_action(&mut self) {
        self.idle_slots = 0;
    }

    /// The starvation error for the current state.
    pub fn starved(&self) -> SchedulerError {
        SchedulerError::Starved {
            actors: self.order.len(),
            idle_slots: self.idle_slots,
        }
    }

    /// Replace the roster and restart at slot zero.
    pub fn rebuild(&mut self, actors: impl IntoIterator<Item = ActorId>) {
        *self = Self::from_roster(actors);
    }

    fn check_cursors(&mut self) {
        let len = self.order.len();
        if self.action_cursor > len {
            report_invariant(InvariantViolation::CursorOverrun {
                cursor: "action",
                index: self.action_cursor,
                len,
            });
            self.action_cursor = len;
        }
        if self.energy_cursor > len {
            report_invariant(InvariantViolation::CursorOverrun {
                cursor: "energy",
                index: self.energy_cursor,
                len,
            });
            self.energy_cursor = len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ids(n: u32) -> Vec<ActorId> {
        (0..n).map(ActorId).collect()
    }

    #[test]
    fn grant_once_per_arrival() {
        let mut s = TurnScheduler::from_roster(ids(2));
        assert_eq!(s.take_grant(), Some(ActorId(0)));
        assert_eq!(s.take_grant(), None);
        assert!(!s.advance());
        assert_eq!(s.take_grant(), Some(ActorId(1)));
        assert!(s.advance());
        assert_eq!((s.action_cursor(), s.energy_cursor()), (0, 0));
        assert_eq!(s.take_grant(), Some(ActorId(0)));
    }

    #[test]
    fn removal_before_cursor_shifts_it_back() {
        let mut s = TurnScheduler::from_roster(ids(4));
        s.take_grant();
        s.advance();
        s.take_grant();
        s.advance();
        s.take_grant();
        assert_eq!((s.action_cursor(), s.energy_cursor()), (2, 3));

        assert!(s.remove(ActorId(0)));
        assert_eq!(s.current(), Some(ActorId(2)));
        assert_eq!((s.action_cursor(), s.energy_cursor()), (1, 2));
        assert!(!s.remove(ActorId(0)));
    }

    #[test]
    fn removing_current_actor_regrants_successor() {
        let mut s = TurnScheduler::from_roster(ids(3));
        s.take_grant();
        s.advance();
        s.take_grant();
        assert!(s.remove(ActorId(1)));
        assert_eq!(s.current(), Some(ActorId(2)));
        assert_eq!(s.take_grant(), Some(ActorId(2)));
    }

    #[test]
    fn removing_last_slot_wraps() {
        let mut s = TurnScheduler::from_roster(ids(2));
        s.take_grant();
        s.advance();
        s.remove(ActorId(1));
        assert_eq!(s.current(), None);
        assert!(s.wrap_if_done());
        assert_eq!(s.current(), Some(ActorId(0)));
    }

    #[test]
    fn late_arrival_granted_in_same_turn() {
        let mut s = TurnScheduler::from_roster(ids(1));
        s.take_grant();
        s.push(ActorId(7));
        s.push(ActorId(7));
        assert_eq!(s.len(), 2);
        assert!(!s.advance());
        assert_eq!(s.take_grant(), Some(ActorId(7)));
    }

    #[test]
    fn idle_limit_trips_starvation() {
        let cfg = SchedulerConfig::default();
        let mut s = TurnScheduler::from_roster(ids(2));
        for _ in 0..cfg.idle_limit(2) {
            s.note_idle(&cfg).unwrap();
        }
        assert_eq!(
            s.note_idle(&cfg),
            Err(SchedulerError::Starved {
                actors: 2,
                idle_slots: 5
            })
        );
        s.note_action();
        assert_eq!(s.idle_slots(), 0);
    }

    #[test]
    fn empty_schedule_never_wraps_into_an_actor() {
        let mut s = TurnScheduler::new();
        assert_eq!(s.take_grant(), None);
        assert!(s.wrap_if_done());
        assert_eq!(s.current(), None);
    }

    proptest! {
        #[test]
        fn cursors_stay_in_range(
            n in 1u32..8,
            ops in proptest::collection::vec((0u8..3, 0u32..10), 0..60),
        ) {
            let mut s = TurnScheduler::from_roster(ids(n));
            let mut next = n;
            for (op, arg) in ops {
                match op {
                    0 => { s.take_grant(); s.advance(); }
                    1 => { s.remove(ActorId(arg)); s.wrap_if_done(); }
                    _ => { s.push(ActorId(next)); next += 1; }
                }
                prop_assert!(s.action_cursor() <= s.len());
                prop_assert!(s.energy_cursor() <= s.action_cursor() + 1);
                prop_assert!(s.is_empty() || s.action_cursor() < s.len());
            }
        }
    }
}
