//! Runtime events and the bus that carries them.
//!
//! - [`Event`] / [`EventKind`] — lifecycle events with optional metadata
//! - [`Bus`] — broadcast channel wrapper for non-blocking publish

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
