// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod analyze;
pub mod api;
pub mod config;
pub mod cooldown;
pub mod dedup;
pub mod engine;
pub mod ingest;
pub mod metrics;
pub mod notify;
pub mod scheduler;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::config::AppConfig;
pub use crate::engine::{AlertEngine, CycleReport, EngineSettings};
pub use crate::notify::{Alert, Notifier, TelegramNotifier};

use std::sync::Arc;

/// Wire the production engine: default RSS feeds plus the Telegram notifier.
pub fn build_engine(cfg: &AppConfig) -> anyhow::Result<AlertEngine> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("viral-news-watch/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let providers = ingest::default_providers(&client);
    let notifier = TelegramNotifier::new(&cfg.telegram_bot_token, &cfg.telegram_chat_id)
        .with_client(client);
    Ok(AlertEngine::new(
        providers,
        Arc::new(notifier),
        EngineSettings::from(cfg),
    ))
}
