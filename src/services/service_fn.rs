//! Closure-backed service (`ServiceFn`).
//!
//! [`ServiceFn`] wraps a closure `F: Fn(CancellationToken) -> Fut`, producing
//! a fresh future per run. No hidden shared state; if the closure needs state
//! across captures, reach for an explicit `Arc<...>`.

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::ServiceError;
use crate::services::service::Service;

/// Closure-backed service implementation.
///
/// ## Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use appvisor::{ServiceError, ServiceFn, ServiceRef};
///
/// let svc: ServiceRef = ServiceFn::arc("worker", |ctx: CancellationToken| async move {
///     ctx.cancelled().await;
///     Ok::<_, ServiceError>(())
/// });
///
/// assert_eq!(svc.name(), "worker");
/// ```
pub struct ServiceFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ServiceFn<F> {
    /// Creates a new closure-backed service.
    ///
    /// Prefer [`ServiceFn::arc`] when you immediately need a [`ServiceRef`](crate::ServiceRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the service and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Service for ServiceFn<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ServiceError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: CancellationToken) -> Result<(), ServiceError> {
        (self.f)(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_service_fn_runs_closure() {
        let svc = ServiceFn::new("once", |_ctx: CancellationToken| async {
            Err(ServiceError::fail("boom"))
        });

        assert_eq!(svc.name(), "once");
        let err = svc.run(CancellationToken::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
