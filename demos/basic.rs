//! Minimal run: one service fails, the group stops, the process exits 1.
//!
//! ```bash
//! cargo run --example basic --features logging
//! ```

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use appvisor::{App, Config, LogWriter, ServiceError, ServiceFn, ServiceRef, Supervisor};

struct DemoApp;

impl App for DemoApp {
    fn services(&self) -> Result<Vec<ServiceRef>, ServiceError> {
        let ticker: ServiceRef = ServiceFn::arc("ticker", |ctx: CancellationToken| async move {
            loop {
                tokio::select! {
                    _ = ctx.cancelled() => return Ok::<_, ServiceError>(()),
                    _ = tokio::time::sleep(Duration::from_millis(300)) => {
                        println!("tick");
                    }
                }
            }
        });

        let flaky: ServiceRef = ServiceFn::arc("flaky", |ctx: CancellationToken| async move {
            tokio::select! {
                _ = ctx.cancelled() => Ok(()),
                _ = tokio::time::sleep(Duration::from_secs(2)) => {
                    Err(ServiceError::fail("flaky gave up"))
                }
            }
        });

        Ok(vec![ticker, flaky])
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let sup = Supervisor::new(Config::default(), vec![Arc::new(LogWriter)]);
    sup.serve(&DemoApp).await
}
