//! Notification events and their synchronous fan-out.
//!
//! The simulation raises a small, fixed vocabulary of [`GameEvent`]s.
//! Subscribers (HUD, message log, persistence) are injected as
//! [`EventSink`] handles into an [`EventBus`], which delivers every
//! event to every sink in subscription order before the triggering call
//! returns. There is no global subscriber list.

use crossbeam_channel::Sender;

use crate::geom::Position;
use crate::id::{ActorId, ItemId, LevelId};

/// Something that happened during a scheduling pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// An actor stepped from one cell to another on the same level.
    ActorMoved {
        /// Who moved.
        actor: ActorId,
        /// Where it stood.
        from: Position,
        /// Where it stands now.
        to: Position,
    },
    /// An actor struck another.
    ActorAttacked {
        /// The striking actor.
        attacker: ActorId,
        /// The struck actor.
        defender: ActorId,
        /// Health removed by the blow.
        damage: i32,
    },
    /// An actor's health reached zero.
    ActorKilled {
        /// The actor that landed the final blow.
        attacker: ActorId,
        /// The actor that died.
        defender: ActorId,
    },
    /// A player-controlled actor's health changed.
    PlayerHealthChanged {
        /// The player actor.
        actor: ActorId,
        /// Health before the change.
        old: i32,
        /// Health after the change.
        new: i32,
        /// Maximum health.
        max: i32,
    },
    /// A player-controlled actor died.
    PlayerDied {
        /// The player actor.
        actor: ActorId,
    },
    /// An actor picked an item up from its tile.
    ItemPickedUp {
        /// The actor.
        actor: ActorId,
        /// The item.
        item: ItemId,
        /// Where the item lay.
        at: Position,
    },
    /// An actor moved between levels through a stair.
    LevelChanged {
        /// The actor.
        actor: ActorId,
        /// Level it left.
        from_level: LevelId,
        /// Level it arrived on.
        to_level: LevelId,
        /// Arrival position on the new level.
        at: Position,
    },
}

/// A subscriber to game events.
pub trait EventSink {
    /// Receive one event. Called synchronously, in emission order.
    fn notify(&mut self, event: &GameEvent);
}

/// Channel senders forward a clone of every event.
///
/// A disconnected receiver is not an error for the simulation; the event
/// is dropped and a warning logged.
impl EventSink for Sender<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        if self.send(event.clone()).is_err() {
            log::warn!("event receiver disconnected, dropping {event:?}");
        }
    }
}

/// Ordered, synchronous fan-out of events to injected sinks.
#[derive(Default)]
pub struct EventBus {
    sinks: Vec<Box<dyn EventSink + Send>>,
}

impl EventBus {
    /// An empty bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink. Sinks are notified in the order they subscribed.
    pub fn subscribe(&mut self, sink: Box<dyn EventSink + Send>) {
        self.sinks.push(sink);
    }

    /// Number of subscribed sinks.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether no sink is subscribed.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Deliver `event` to every sink before returning.
    pub fn notify(&mut self, event: &GameEvent) {
        log::trace!("event {event:?}");
        for sink in &mut self.sinks {
            sink.notify(event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Tagged {
        tag: u8,
        log: Arc<Mutex<Vec<(u8, GameEvent)>>>,
    }

    impl EventSink for Tagged {
        fn notify(&mut self, event: &GameEvent) {
            self.log.lock().unwrap().push((self.tag, event.clone()));
        }
    }

    fn died(n: u32) -> GameEvent {
        GameEvent::PlayerDied { actor: ActorId(n) }
    }

    #[test]
    fn delivers_to_all_sinks_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(Tagged { tag: 1, log: log.clone() }));
        bus.subscribe(Box::new(Tagged { tag: 2, log: log.clone() }));

        bus.notify(&died(1));
        bus.notify(&died(2));

        let seen = log.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![(1, died(1)), (2, died(1)), (1, died(2)), (2, died(2))]
        );
    }

    #[test]
    fn channel_sink_forwards_clones() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(tx));
        bus.notify(&died(5));
        assert_eq!(rx.try_recv().unwrap(), died(5));
    }

    #[test]
    fn disconnected_channel_is_ignored() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(tx));
        bus.notify(&died(1));
        assert_eq!(bus.len(), 1);
    }
}
