//! The service contract.
//!
//! A [`Service`] is a long-running unit of work that cooperates with a shared
//! [`CancellationToken`]. The supervisor owns the service for the duration of
//! one run and collects exactly one outcome from it.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::ServiceError;

/// Shared handle to a service, as passed to the supervisor.
pub type ServiceRef = Arc<dyn Service>;

/// # A long-running, cancelable unit of work.
///
/// `run` executes until the service completes on its own (success or failure)
/// or until the shared cancellation token fires.
///
/// ## Cooperative contract
/// Implementations **must** observe `ctx` and return promptly with `Ok(())`
/// once it is cancelled. The supervisor relies on this when draining: it
/// waits for every started service with no deadline, so a service that
/// ignores cancellation leaves the whole run hanging.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use appvisor::{Service, ServiceError};
///
/// struct Heartbeat;
///
/// #[async_trait]
/// impl Service for Heartbeat {
///     fn name(&self) -> &str {
///         "heartbeat"
///     }
///
///     async fn run(&self, ctx: CancellationToken) -> Result<(), ServiceError> {
///         loop {
///             tokio::select! {
///                 _ = ctx.cancelled() => return Ok(()),
///                 _ = tokio::time::sleep(std::time::Duration::from_secs(1)) => {
///                     // emit heartbeat...
///                 }
///             }
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Service: Send + Sync + 'static {
    /// Returns a stable, human-readable service name.
    fn name(&self) -> &str;

    /// Runs the service until completion or cancellation.
    ///
    /// Returning `Err` marks the service as failed and triggers shutdown of
    /// its siblings if the failure is the first one observed. A
    /// cancellation-triggered stop returns `Ok(())`.
    async fn run(&self, ctx: CancellationToken) -> Result<(), ServiceError>;
}
