//! Viral News Watch binary entrypoint.
//! Loads configuration, starts the background engine loop, and serves the
//! status / force-check routes.

use std::sync::Arc;

use anyhow::Context;
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use viral_news_watch::{api, build_engine, metrics::Metrics, scheduler, AppConfig, AppState};

/// Compact fmt logs filtered by `RUST_LOG` (default: our crate at info).
/// Uses `try_init` because the Shuttle runtime may already own the global subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("viral_news_watch=info,warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = AppConfig::from_env().context("loading configuration")?;
    if cfg.telegram_bot_token.is_empty() || cfg.telegram_chat_id.is_empty() {
        tracing::warn!("TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID not set; alerts will only be logged");
    }

    let metrics = match Metrics::init() {
        Ok(m) => Some(m),
        Err(e) => {
            tracing::warn!(error = ?e, "metrics disabled");
            None
        }
    };

    let engine = Arc::new(build_engine(&cfg).context("building engine")?);
    scheduler::spawn_engine_loop(engine.clone(), cfg.fetch_interval());

    let state = AppState {
        engine,
        config: Arc::new(cfg),
        metrics,
    };
    let router = api::router(state);

    Ok(router.into())
}
