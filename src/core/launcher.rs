//! Launches one service and guarantees exactly one outcome.
//!
//! The launch wrapper is the boundary where a service's execution meets the
//! supervisor:
//!
//! - a normal return (success or failure) is forwarded as the outcome;
//! - an unwind is caught **here**, before it can cross the task boundary, and
//!   converted into a [`ServiceError::Panic`] carrying the payload and a
//!   backtrace captured at the recovery site;
//! - whichever path was taken, exactly one outcome is delivered to the shared
//!   channel.
//!
//! ## Event flow
//! ```text
//! ServiceStarting → service.run(ctx) → Ok           → ServiceStopped
//!                                    → Err(e)       → ServiceFailed
//!                                    → unwind caught → ServicePanicked
//! ```

use std::any::Any;
use std::backtrace::Backtrace;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::ServiceError;
use crate::events::{Bus, Event, EventKind};
use crate::services::{Service, ServiceRef};

/// One service's reported result, delivered exactly once per launch.
pub(crate) type Outcome = Result<(), ServiceError>;

/// Spawns `service` on its own tokio task.
///
/// The outcome channel must have capacity for every launched service so the
/// send below never blocks; the supervisor may stop selecting before it
/// starts draining.
pub(crate) fn launch_service(
    service: ServiceRef,
    ctx: CancellationToken,
    outcomes: mpsc::Sender<Outcome>,
    bus: Bus,
) {
    tokio::spawn(async move {
        bus.publish(Event::new(EventKind::ServiceStarting).with_service(service.name()));

        let result = run_caught(service.as_ref(), ctx).await;
        publish_outcome(&bus, service.name(), &result);

        let _ = outcomes.send(result).await;
    });
}

/// Runs the service, converting an unwind into a normal error outcome.
async fn run_caught(service: &dyn Service, ctx: CancellationToken) -> Outcome {
    match AssertUnwindSafe(service.run(ctx)).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(ServiceError::Panic {
            message: panic_message(payload),
            backtrace: Backtrace::force_capture().to_string(),
        }),
    }
}

/// Publishes the terminal lifecycle event for one launch.
fn publish_outcome(bus: &Bus, name: &str, result: &Outcome) {
    match result {
        Ok(()) => {
            bus.publish(Event::new(EventKind::ServiceStopped).with_service(name));
        }
        Err(e) if e.is_panic() => {
            bus.publish(
                Event::new(EventKind::ServicePanicked)
                    .with_service(name)
                    .with_reason(e.as_message()),
            );
        }
        Err(e) => {
            bus.publish(
                Event::new(EventKind::ServiceFailed)
                    .with_service(name)
                    .with_reason(e.as_message()),
            );
        }
    }
}

/// Extracts a printable message from a panic payload.
fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceFn;

    #[tokio::test]
    async fn test_panic_is_caught_and_described() {
        let svc = ServiceFn::new("boomer", |_ctx: CancellationToken| async {
            if true {
                panic!("boom");
            }
            Ok::<_, ServiceError>(())
        });

        let err = run_caught(&svc, CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.is_panic());
        assert!(err.to_string().starts_with("service panic: boom"));
    }

    #[test]
    fn test_panic_message_downcasts() {
        assert_eq!(panic_message(Box::new("str payload")), "str payload");
        assert_eq!(
            panic_message(Box::new(String::from("string payload"))),
            "string payload"
        );
        assert_eq!(panic_message(Box::new(42u32)), "unknown panic payload");
    }
}
