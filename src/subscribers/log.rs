//! Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [starting] service=worker
//! [failed] service=worker err="connection refused"
//! [panicked] service=worker err="service panic: boom"
//! [stopped] service=worker
//! [shutdown-requested]
//! [group-stopped]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Stdout logging subscriber.
///
/// Enabled via the `logging` feature. Intended for development and demos;
/// implement a custom [`Subscribe`] for structured logging or metrics.
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let service = e.service.as_deref().unwrap_or("?");
        match e.kind {
            EventKind::ServiceStarting => {
                println!("[starting] service={service}");
            }
            EventKind::ServiceStopped => {
                println!("[stopped] service={service}");
            }
            EventKind::ServiceFailed => {
                println!(
                    "[failed] service={service} err={:?}",
                    e.reason.as_deref().unwrap_or("")
                );
            }
            EventKind::ServicePanicked => {
                println!(
                    "[panicked] service={service} err={:?}",
                    e.reason.as_deref().unwrap_or("")
                );
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::GroupStopped => {
                println!("[group-stopped]");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log_writer"
    }
}
