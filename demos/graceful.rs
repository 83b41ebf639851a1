//! Graceful shutdown: two tickers run until Ctrl-C, then stop together.
//!
//! ```bash
//! cargo run --example graceful --features logging
//! # press Ctrl-C; the process exits 0
//! ```

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use appvisor::{App, Config, LogWriter, ServiceError, ServiceFn, ServiceRef, Supervisor};

fn ticker(name: &'static str, every: Duration) -> ServiceRef {
    ServiceFn::arc(name, move |ctx: CancellationToken| async move {
        loop {
            tokio::select! {
                _ = ctx.cancelled() => return Ok::<_, ServiceError>(()),
                _ = tokio::time::sleep(every) => {
                    println!("{name}: tick");
                }
            }
        }
    })
}

struct TickerApp;

impl App for TickerApp {
    fn services(&self) -> Result<Vec<ServiceRef>, ServiceError> {
        Ok(vec![
            ticker("fast", Duration::from_millis(400)),
            ticker("slow", Duration::from_secs(1)),
        ])
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let sup = Supervisor::new(Config::default(), vec![Arc::new(LogWriter)]);
    sup.serve(&TickerApp).await
}
