//! # appvisor
//!
//! **Appvisor** is a minimal process lifecycle supervisor for Rust.
//!
//! It runs a fixed set of long-lived services concurrently, waits for either
//! an external shutdown signal or the first service failure, tells every
//! sibling to stop, and reports a single terminating cause once all of them
//! have. It deliberately does **not** schedule, retry, restart, or order
//! services; it is the piece you call from `main` to hold an application's
//! background work together.
//!
//! ## Architecture
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  ServiceRef  │   │  ServiceRef  │   │  ServiceRef  │
//!     │ (service #1) │   │ (service #2) │   │ (service #3) │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Supervisor                                                   │
//! │  - launches one task per service (panics caught at the edge)  │
//! │  - select { token cancelled | first outcome }                 │
//! │  - cancels the shared token on first outcome                  │
//! │  - drains every outcome before returning the cause            │
//! │  - Bus → SubscriberSet (lifecycle observability)              │
//! └───────────────────────────────────────────────────────────────┘
//!            ▲
//!            │ cancel()
//!   OS signal watcher (SIGINT/SIGTERM) — wired up by Supervisor::serve
//! ```
//!
//! ## Lifecycle
//! ```text
//! App::services() ──► launch all ──► Running
//!    │ Err: propagate, start nothing
//!    ▼
//! Running ──► first outcome ───► cancel token ──► Draining ──► Completed
//!         └─► external cancel ─────────────────► Draining ──► Completed
//! ```
//!
//! Exactly one termination result per run: the first observed failure, or no
//! error when shutdown was externally triggered. Later failures are drained
//! and discarded, never aggregated.
//!
//! ## Example
//! ```no_run
//! use std::process::ExitCode;
//! use tokio_util::sync::CancellationToken;
//! use appvisor::{App, Config, ServiceError, ServiceFn, ServiceRef, Supervisor};
//!
//! struct MyApp;
//!
//! impl App for MyApp {
//!     fn services(&self) -> Result<Vec<ServiceRef>, ServiceError> {
//!         Ok(vec![ServiceFn::arc("ticker", |ctx: CancellationToken| async move {
//!             loop {
//!                 tokio::select! {
//!                     _ = ctx.cancelled() => return Ok::<_, ServiceError>(()),
//!                     _ = tokio::time::sleep(std::time::Duration::from_secs(1)) => {
//!                         println!("tick");
//!                     }
//!                 }
//!             }
//!         })])
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> ExitCode {
//!     let sup = Supervisor::new(Config::default(), Vec::new());
//!     sup.serve(&MyApp).await
//! }
//! ```
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.

mod app;
mod config;
mod core;
mod error;
mod events;
mod services;
mod subscribers;

// ---- Public re-exports ----

pub use app::App;
pub use config::Config;
pub use core::Supervisor;
pub use error::ServiceError;
pub use events::{Bus, Event, EventKind};
pub use services::{Service, ServiceFn, ServiceRef};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
