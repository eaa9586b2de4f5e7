//! Outbound alerts: message template plus the delivery channel.

pub mod telegram;

use anyhow::Result;

pub use telegram::TelegramNotifier;

/// Display scale shown next to the score; the real cap is `analyze::MAX_SCORE`.
pub const SCORE_DISPLAY_MAX: u32 = 100;

/// A headline that cleared the threshold.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Alert {
    pub score: u32,
    pub topic: String,
    pub title: String,
    pub link: String,
}

/// Fixed alert template.
pub fn format_alert(alert: &Alert) -> String {
    format!(
        "🚨 ALERTA VIRAL ({})\nScore: {}/{}\n\nTITULAR:\n{}\n\nLINK:\n{}\n\nHOOK VALERIA:\nATENCIÓN EE.UU., esto se está viralizando ahora mismo…",
        alert.topic.to_uppercase(),
        alert.score,
        SCORE_DISPLAY_MAX,
        alert.title,
        alert.link
    )
}

/// Best-effort, single-attempt delivery.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, alert: &Alert) -> Result<()>;
}
