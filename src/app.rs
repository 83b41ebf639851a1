//! The application seam: who decides what runs.
//!
//! An [`App`] is the collaborator that owns setup. It produces the list of
//! services for one supervised run, and it is allowed to fail; a setup failure
//! terminates the run before any service starts, with that failure as the
//! cause.

use crate::error::ServiceError;
use crate::services::ServiceRef;

/// A runtime application: the source of the services to supervise.
///
/// Implementations typically wire configuration, open listeners or
/// connections, and hand back the long-running pieces as [`ServiceRef`]s.
///
/// # Example
/// ```
/// use appvisor::{App, ServiceError, ServiceRef};
///
/// struct MyApp;
///
/// impl App for MyApp {
///     fn services(&self) -> Result<Vec<ServiceRef>, ServiceError> {
///         Ok(Vec::new())
///     }
/// }
/// ```
pub trait App: Send + Sync {
    /// Produces the services to run.
    ///
    /// An `Err` here means setup failed: the supervisor propagates it
    /// verbatim and starts nothing.
    fn services(&self) -> Result<Vec<ServiceRef>, ServiceError>;
}
