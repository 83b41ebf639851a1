//! Runtime events emitted by the supervisor and its launch wrappers.
//!
//! [`EventKind`] classifies what happened; [`Event`] carries the metadata a
//! subscriber might need (timestamp, service name, reason). Each event gets a
//! globally unique, monotonically increasing sequence number so order can be
//! restored even when delivery is fanned out.
//!
//! ## Example
//! ```
//! use appvisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::ServiceFailed)
//!     .with_service("worker")
//!     .with_reason("connection refused");
//!
//! assert_eq!(ev.kind, EventKind::ServiceFailed);
//! assert_eq!(ev.service.as_deref(), Some("worker"));
//! assert_eq!(ev.reason.as_deref(), Some("connection refused"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// External cancellation observed (OS signal or explicit trigger).
    ///
    /// Sets: `at`, `seq`.
    ShutdownRequested,

    /// A service is being launched.
    ///
    /// Sets: `service`, `at`, `seq`.
    ServiceStarting,

    /// A service stopped cleanly (finished on its own or honored
    /// cancellation).
    ///
    /// Sets: `service`, `at`, `seq`.
    ServiceStopped,

    /// A service reported a failure.
    ///
    /// Sets: `service`, `reason`, `at`, `seq`.
    ServiceFailed,

    /// A service's execution unwound and was recovered at the launch
    /// boundary.
    ///
    /// Sets: `service`, `reason` (payload, no backtrace), `at`, `seq`.
    ServicePanicked,

    /// Every launched service has reported its outcome; the run is over.
    ///
    /// Sets: `at`, `seq`.
    GroupStopped,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the service, if applicable.
    pub service: Option<Arc<str>>,
    /// Human-readable reason (failure message, panic payload).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// the next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            service: None,
            reason: None,
        }
    }

    /// Attaches a service name.
    #[inline]
    pub fn with_service(mut self, service: impl Into<Arc<str>>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic() {
        let a = Event::new(EventKind::ServiceStarting);
        let b = Event::new(EventKind::ServiceStopped);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_builders_attach_metadata() {
        let ev = Event::new(EventKind::ServicePanicked)
            .with_service("worker")
            .with_reason("service panic: boom");
        assert_eq!(ev.service.as_deref(), Some("worker"));
        assert_eq!(ev.reason.as_deref(), Some("service panic: boom"));
    }
}
