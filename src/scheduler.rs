// src/scheduler.rs
use std::sync::Arc;
use std::time::Duration;

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use tokio::task::JoinHandle;

use crate::engine::{AlertEngine, CycleReport};

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("engine_cycles_total", "Engine cycles started.");
        describe_counter!(
            "engine_cycle_errors_total",
            "Engine cycles that panicked and were contained."
        );
    });
}

/// Run one cycle on its own task so a panic anywhere inside is contained.
/// Returns `None` if the cycle did not complete.
pub async fn run_guarded(engine: Arc<AlertEngine>) -> Option<CycleReport> {
    ensure_metrics_described();
    counter!("engine_cycles_total").increment(1);

    match tokio::spawn(async move { engine.run_cycle().await }).await {
        Ok(report) => Some(report),
        Err(e) => {
            tracing::error!(target: "engine", error = %e, "engine cycle failed");
            counter!("engine_cycle_errors_total").increment(1);
            None
        }
    }
}

/// Spawn the background loop: run a cycle, then sleep `interval`, forever.
/// There is no in-band stop; abort the handle or exit the process.
pub fn spawn_engine_loop(engine: Arc<AlertEngine>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!(
            target: "engine",
            interval_secs = interval.as_secs(),
            "engine loop started"
        );
        loop {
            let _ = run_guarded(engine.clone()).await;
            tokio::time::sleep(interval).await;
        }
    })
}
