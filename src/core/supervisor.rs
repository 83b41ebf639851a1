//! # Supervisor: runs a group of services to a single termination result.
//!
//! The [`Supervisor`] owns the event bus and a [`SubscriberSet`]. It launches
//! every service on its own task, waits for the first failure or an external
//! cancellation, tells the rest to stop, and drains every outcome before
//! reporting the run's single cause.
//!
//! ## High-level flow
//! ```text
//! Inputs to run():
//!   App::services() ──► Vec<ServiceRef> ──► run_group(token, services)
//!                   └─ Err ──► propagated verbatim, nothing starts
//!
//! Launch:
//!   ServiceRef[0]  ServiceRef[1]  ...  ServiceRef[N-1]
//!       │              │                    │
//!       └──► launch_service(svc, token, outcomes, bus)     (one task per service)
//!                 └──► catch unwinds, send exactly one Outcome
//!
//! Coordinate:
//!   select! {
//!     token.cancelled()   → external shutdown, no cause manufactured
//!     outcomes.recv()     → record first cause (if any), token.cancel()
//!   }
//!
//! Drain:
//!   receive until all N launched services have reported
//!   → publish GroupStopped, return the recorded cause (or Ok)
//! ```
//!
//! ## Cooperative contract
//! Every service must observe the shared token and return promptly once it
//! fires. The drain phase waits with **no deadline**; a service that ignores
//! cancellation leaves the run in `Draining` forever. This is a documented
//! contract, not something the supervisor enforces.
//!
//! ## Example
//! ```
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use appvisor::{Config, ServiceError, ServiceFn, ServiceRef, Supervisor};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), ServiceError> {
//!     let sup = Supervisor::new(Config::default(), Vec::new());
//!
//!     let ticker: ServiceRef = ServiceFn::arc("ticker", |ctx: CancellationToken| async move {
//!         loop {
//!             tokio::select! {
//!                 _ = ctx.cancelled() => return Ok::<_, ServiceError>(()),
//!                 _ = tokio::time::sleep(Duration::from_millis(10)) => {}
//!             }
//!         }
//!     });
//!     let once: ServiceRef = ServiceFn::arc("once", |_ctx: CancellationToken| async move {
//!         Ok::<_, ServiceError>(())
//!     });
//!
//!     // "once" finishes first; its outcome stops the group, "ticker" honors
//!     // the token, and the run ends with no error.
//!     sup.run_group(CancellationToken::new(), vec![once, ticker]).await
//! }
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::app::App;
use crate::config::Config;
use crate::core::launcher::{Outcome, launch_service};
use crate::core::shutdown;
use crate::error::ServiceError;
use crate::events::{Bus, Event, EventKind};
use crate::services::ServiceRef;
use crate::subscribers::{Subscribe, SubscriberSet};

/// Coordinates a group of services and the delivery of their lifecycle
/// events.
pub struct Supervisor {
    /// Global runtime configuration.
    pub cfg: Config,
    /// Event bus shared with every launch wrapper.
    pub bus: Bus,
    /// Fan-out set for subscribers.
    pub subs: Arc<SubscriberSet>,
}

impl Supervisor {
    /// Creates a new supervisor with the given config and subscribers.
    ///
    /// Subscriber workers are spawned here, so a supervisor with subscribers
    /// must be built inside a tokio runtime.
    pub fn new(cfg: Config, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(subscribers));
        Self { cfg, bus, subs }
    }

    /// Runs the app at the process boundary: root token, OS signals, exit
    /// code.
    ///
    /// This is the piece `main` calls. It derives the root cancellation
    /// token, cancels it when a termination signal arrives, runs the app,
    /// and maps the termination result to an exit code: a non-nil cause is
    /// printed to stderr and yields `ExitCode::FAILURE`, otherwise
    /// `ExitCode::SUCCESS`.
    pub async fn serve(&self, app: &dyn App) -> ExitCode {
        let token = CancellationToken::new();

        let watcher = token.clone();
        tokio::spawn(async move {
            if shutdown::wait_for_shutdown_signal().await.is_ok() {
                watcher.cancel();
            }
        });

        match self.run(token, app).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        }
    }

    /// Obtains the service list from `app` and supervises it.
    ///
    /// A setup failure is returned verbatim; no service starts.
    pub async fn run(
        &self,
        token: CancellationToken,
        app: &dyn App,
    ) -> Result<(), ServiceError> {
        let services = app.services()?;
        self.run_group(token, services).await
    }

    /// Runs a group of services until external cancellation or first failure,
    /// then drains every outcome and returns the single termination cause.
    ///
    /// ### Behavior
    /// 1. An empty group returns `Ok(())` immediately; the token is not
    ///    touched.
    /// 2. Every service is launched concurrently, sharing `token`. Each
    ///    launch delivers exactly one outcome, with unwinds recovered at the
    ///    launch boundary.
    /// 3. The first of {token cancelled, first outcome} wins. A first
    ///    outcome records its error (if any) as the cause and cancels the
    ///    token; external cancellation records nothing.
    /// 4. Outcomes are received until every launched service has reported,
    ///    so no service outlives the run.
    /// 5. The recorded cause (or `Ok`) is returned.
    ///
    /// ### Race semantics
    /// When cancellation and a first outcome become ready simultaneously,
    /// which branch wins is deliberately left to `select!`'s unspecified
    /// choice; a graceful shutdown and a near-simultaneous failure may
    /// legitimately race. Only the first outcome ever becomes the cause;
    /// later failures are drained and discarded.
    pub async fn run_group(
        &self,
        token: CancellationToken,
        services: Vec<ServiceRef>,
    ) -> Result<(), ServiceError> {
        if services.is_empty() {
            return Ok(());
        }
        self.subscriber_listener();

        // Capacity equals the service count so no launch wrapper ever blocks
        // on send; the select below may have already resolved by the time a
        // late outcome arrives.
        let count = services.len();
        let (tx, mut rx) = mpsc::channel::<Outcome>(count);

        for service in services {
            launch_service(service, token.clone(), tx.clone(), self.bus.clone());
        }
        drop(tx);

        let mut cause: Option<ServiceError> = None;
        let mut received = 0usize;

        tokio::select! {
            _ = token.cancelled() => {
                self.bus.publish(Event::new(EventKind::ShutdownRequested));
            }
            outcome = rx.recv() => {
                if let Some(outcome) = outcome {
                    received += 1;
                    cause = outcome.err();
                    token.cancel();
                }
            }
        }

        // Drain: the run is not over until every launched service reported.
        while received < count {
            match rx.recv().await {
                Some(_) => received += 1,
                None => break,
            }
        }

        self.bus.publish(Event::new(EventKind::GroupStopped));
        match cause {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Forwards bus events to the subscriber set (fire-and-forget).
    fn subscriber_listener(&self) {
        if self.subs.is_empty() {
            return;
        }
        let mut rx = self.bus.subscribe();
        let set = Arc::clone(&self.subs);
        tokio::spawn(async move {
            while let Ok(ev) = rx.recv().await {
                set.emit(&ev);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::time;

    use super::*;
    use crate::services::Service;

    struct TestApp {
        fails_setup: bool,
        services: Vec<ServiceRef>,
    }

    impl TestApp {
        fn new(fails_setup: bool, services: Vec<ServiceRef>) -> Self {
            Self {
                fails_setup,
                services,
            }
        }
    }

    impl App for TestApp {
        fn services(&self) -> Result<Vec<ServiceRef>, ServiceError> {
            if self.fails_setup {
                return Err(ServiceError::setup("failed setup"));
            }
            Ok(self.services.clone())
        }
    }

    /// Sleeps for `timeout`, then errors (or panics) with "timeout ended".
    /// Returns `Ok(())` if cancelled first.
    struct TimeoutService {
        name: String,
        timeout: Duration,
        should_panic: bool,
        stopped: Arc<AtomicUsize>,
    }

    impl TimeoutService {
        fn new(name: &str, timeout: Duration) -> Self {
            Self {
                name: name.to_string(),
                timeout,
                should_panic: false,
                stopped: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn panicking(mut self) -> Self {
            self.should_panic = true;
            self
        }
    }

    #[async_trait]
    impl Service for TimeoutService {
        fn name(&self) -> &str {
            &self.name
        }

        async fn run(&self, ctx: CancellationToken) -> Result<(), ServiceError> {
            tokio::select! {
                _ = ctx.cancelled() => {
                    self.stopped.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
                _ = time::sleep(self.timeout) => {
                    self.stopped.fetch_add(1, Ordering::SeqCst);
                    if self.should_panic {
                        panic!("timeout ended");
                    }
                    Err(ServiceError::fail("timeout ended"))
                }
            }
        }
    }

    fn supervisor() -> Supervisor {
        Supervisor::new(Config::default(), Vec::new())
    }

    #[tokio::test]
    async fn test_run_exits_when_setup_fails() {
        let app = TestApp::new(true, Vec::new());
        let token = CancellationToken::new();

        let err = supervisor().run(token.clone(), &app).await.unwrap_err();

        assert_eq!(err.to_string(), "failed setup");
        assert_eq!(err.as_label(), "setup_failed");
        assert!(!token.is_cancelled());
    }

    #[tokio::test]
    async fn test_run_exits_when_no_services() {
        let app = TestApp::new(false, Vec::new());
        let token = CancellationToken::new();

        let res = supervisor().run(token.clone(), &app).await;

        assert!(res.is_ok());
        assert!(!token.is_cancelled());
    }

    #[tokio::test]
    async fn test_run_exits_cleanly_when_token_cancelled() {
        let svc = Arc::new(TimeoutService::new("timeout1", Duration::from_millis(1000)));
        let stopped = svc.stopped.clone();
        let app = TestApp::new(false, vec![svc]);
        let token = CancellationToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(100)).await;
            canceller.cancel();
        });

        let res = supervisor().run(token, &app).await;

        assert!(res.is_ok());
        // Drained: the service observed cancellation before the run returned.
        assert_eq!(stopped.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_exits_when_service_returns_error() {
        let svc = Arc::new(TimeoutService::new("timeout1", Duration::from_millis(100)));
        let app = TestApp::new(false, vec![svc]);
        let token = CancellationToken::new();

        let err = supervisor().run(token.clone(), &app).await.unwrap_err();

        assert_eq!(err.to_string(), "timeout ended");
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_run_exits_when_service_panics() {
        let svc =
            Arc::new(TimeoutService::new("timeout1", Duration::from_millis(100)).panicking());
        let app = TestApp::new(false, vec![svc]);

        let err = supervisor()
            .run(CancellationToken::new(), &app)
            .await
            .unwrap_err();

        assert!(err.is_panic());
        assert!(err.to_string().starts_with("service panic: timeout ended"));
        // Diagnostic detail beyond the payload line.
        assert!(err.to_string().len() > "service panic: timeout ended".len());
    }

    #[tokio::test]
    async fn test_first_error_wins_and_siblings_drain() {
        let failing = Arc::new(TimeoutService::new("failing", Duration::from_millis(50)));
        let slow1 = Arc::new(TimeoutService::new("slow1", Duration::from_secs(10)));
        let slow2 = Arc::new(TimeoutService::new("slow2", Duration::from_secs(10)));
        let counters = [
            failing.stopped.clone(),
            slow1.stopped.clone(),
            slow2.stopped.clone(),
        ];
        let token = CancellationToken::new();

        let err = supervisor()
            .run_group(token.clone(), vec![failing, slow1, slow2])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "timeout ended");
        assert!(token.is_cancelled());
        // Every launched service returned before run_group did.
        for counter in &counters {
            assert_eq!(counter.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_first_outcome_ok_still_stops_group() {
        let once: ServiceRef =
            crate::ServiceFn::arc("once", |_ctx: CancellationToken| async move {
                Ok::<_, ServiceError>(())
            });
        let slow = Arc::new(TimeoutService::new("slow", Duration::from_secs(10)));
        let stopped = slow.stopped.clone();
        let token = CancellationToken::new();

        let res = supervisor().run_group(token.clone(), vec![once, slow]).await;

        assert!(res.is_ok());
        assert!(token.is_cancelled());
        assert_eq!(stopped.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_later_failures_are_discarded() {
        let first = Arc::new(TimeoutService::new("first", Duration::from_millis(20)));
        // Ignores cancellation long enough to fail as well; its error must
        // not replace the first one.
        let second: ServiceRef =
            crate::ServiceFn::arc("second", |_ctx: CancellationToken| async move {
                time::sleep(Duration::from_millis(80)).await;
                Err(ServiceError::fail("second failure"))
            });

        let err = supervisor()
            .run_group(CancellationToken::new(), vec![first, second])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "timeout ended");
    }

    #[tokio::test]
    async fn test_lifecycle_events_are_published() {
        let sup = supervisor();
        let mut rx = sup.bus.subscribe();

        let svc = Arc::new(TimeoutService::new("timeout1", Duration::from_millis(20)));
        let _ = sup
            .run_group(CancellationToken::new(), vec![svc])
            .await;

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        assert!(kinds.contains(&EventKind::ServiceStarting));
        assert!(kinds.contains(&EventKind::ServiceFailed));
        assert_eq!(kinds.last(), Some(&EventKind::GroupStopped));
    }

    #[tokio::test]
    async fn test_external_cancel_publishes_shutdown_requested() {
        let sup = supervisor();
        let mut rx = sup.bus.subscribe();

        let svc = Arc::new(TimeoutService::new("timeout1", Duration::from_secs(10)));
        let token = CancellationToken::new();
        token.cancel();

        let res = sup.run_group(token, vec![svc]).await;
        assert!(res.is_ok());

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        assert!(kinds.contains(&EventKind::ShutdownRequested));
        assert!(kinds.contains(&EventKind::ServiceStopped));
    }
}
