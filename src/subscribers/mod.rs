//! Event subscribers: the extension point for observability.
//!
//! - [`Subscribe`] — trait implemented by event handlers
//! - [`SubscriberSet`] — non-blocking fan-out with per-subscriber queues
//! - [`LogWriter`] — built-in stdout subscriber (feature `logging`)

mod set;
mod subscribe;

#[cfg(feature = "logging")]
mod log;

pub use set::SubscriberSet;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
