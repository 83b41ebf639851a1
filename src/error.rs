//! Error types used by the appvisor runtime and services.
//!
//! A single enum, [`ServiceError`], covers the whole failure taxonomy:
//!
//! - [`ServiceError::Setup`] — the service list could not be produced; fatal,
//!   nothing ever starts.
//! - [`ServiceError::Fail`] — a service's own reported failure.
//! - [`ServiceError::Panic`] — a service's execution unwound; recovered at the
//!   launch boundary and converted into a descriptive error.
//!
//! Display rules matter here: a [`ServiceError::Fail`] renders the verbatim
//! message the service reported, and a [`ServiceError::Panic`] renders
//! `service panic: <payload>` followed by the captured backtrace, so the
//! terminating cause of a run stays debuggable after the fact.

use thiserror::Error;

/// # Errors produced by setup and service execution.
///
/// The first of these observed by the [`Supervisor`](crate::Supervisor)
/// becomes the termination cause of the whole run.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The [`App`](crate::App) failed to produce its service list.
    ///
    /// Propagated verbatim before any service starts.
    #[error("{error}")]
    Setup {
        /// The underlying setup failure message.
        error: String,
    },

    /// A service reported a failure from its own `run`.
    #[error("{error}")]
    Fail {
        /// The underlying error message, surfaced verbatim.
        error: String,
    },

    /// A service's execution unwound instead of returning.
    ///
    /// Produced by the launch wrapper, never by services themselves. Carries
    /// the panic payload and a backtrace captured at the recovery site.
    #[error("service panic: {message}\n\n{backtrace}")]
    Panic {
        /// Stringified panic payload.
        message: String,
        /// Backtrace captured where the unwind was caught.
        backtrace: String,
    },
}

impl ServiceError {
    /// Creates a setup failure from any displayable value.
    pub fn setup(error: impl std::fmt::Display) -> Self {
        ServiceError::Setup {
            error: error.to_string(),
        }
    }

    /// Creates a service failure from any displayable value.
    pub fn fail(error: impl std::fmt::Display) -> Self {
        ServiceError::Fail {
            error: error.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use appvisor::ServiceError;
    ///
    /// let err = ServiceError::fail("boom");
    /// assert_eq!(err.as_label(), "service_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ServiceError::Setup { .. } => "setup_failed",
            ServiceError::Fail { .. } => "service_failed",
            ServiceError::Panic { .. } => "service_panic",
        }
    }

    /// Returns a one-line human-readable message.
    ///
    /// Unlike `Display`, the panic variant omits the backtrace here; this is
    /// the form events and log lines carry.
    pub fn as_message(&self) -> String {
        match self {
            ServiceError::Setup { error } => format!("setup failed: {error}"),
            ServiceError::Fail { error } => error.clone(),
            ServiceError::Panic { message, .. } => format!("service panic: {message}"),
        }
    }

    /// True if this error came from a recovered unwind rather than a normal
    /// return.
    pub fn is_panic(&self) -> bool {
        matches!(self, ServiceError::Panic { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_displays_verbatim_message() {
        let err = ServiceError::fail("timeout ended");
        assert_eq!(err.to_string(), "timeout ended");
    }

    #[test]
    fn test_setup_displays_verbatim_message() {
        let err = ServiceError::setup("failed setup");
        assert_eq!(err.to_string(), "failed setup");
    }

    #[test]
    fn test_panic_display_starts_with_payload() {
        let err = ServiceError::Panic {
            message: "timeout ended".into(),
            backtrace: "0: frame".into(),
        };
        assert!(err.to_string().starts_with("service panic: timeout ended"));
        assert!(err.to_string().contains("0: frame"));
        assert!(err.is_panic());
    }

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(ServiceError::setup("x").as_label(), "setup_failed");
        assert_eq!(ServiceError::fail("x").as_label(), "service_failed");
        let panic = ServiceError::Panic {
            message: "x".into(),
            backtrace: String::new(),
        };
        assert_eq!(panic.as_label(), "service_panic");
        assert_eq!(panic.as_message(), "service panic: x");
    }
}
