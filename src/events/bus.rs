//! Event bus for broadcasting runtime events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] giving the
//! supervisor and its launch wrappers a non-blocking `publish`.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks or awaits.
//! - **Bounded capacity**: a single ring buffer stores recent events for all
//!   receivers; receivers that fall behind observe `RecvError::Lagged(n)` and
//!   skip the `n` oldest items.
//! - **No persistence**: events published with no active receiver are lost.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for runtime events.
///
/// Cheap to clone (the sender is `Arc`-backed); many publishers, any number
/// of independent receivers.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (clamped to 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// If there are no receivers the event is dropped; this still returns
    /// immediately.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver observing subsequent events.
    ///
    /// A receiver only sees events sent after it subscribed.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();

        bus.publish(Event::new(EventKind::ServiceStarting).with_service("a"));
        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::ServiceStarting);
        assert_eq!(ev.service.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_publish_without_receivers_is_noop() {
        let bus = Bus::new(1);
        // Must not panic or block.
        bus.publish(Event::new(EventKind::GroupStopped));
    }
}
