use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::{format_alert, Alert, Notifier};
use crate::config::{ENV_TELEGRAM_BOT_TOKEN, ENV_TELEGRAM_CHAT_ID};

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Clone)]
pub struct TelegramNotifier {
    token: String,
    chat_id: String,
    api_base: String,
    client: Client,
    timeout: Duration,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            token: token.into().trim().to_string(),
            chat_id: chat_id.into().trim().to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            client: Client::new(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Reads `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID`; missing values leave it unconfigured.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var(ENV_TELEGRAM_BOT_TOKEN).unwrap_or_default(),
            std::env::var(ENV_TELEGRAM_CHAT_ID).unwrap_or_default(),
        )
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Point at a different Bot API host (self-hosted bot API, tests).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.token.is_empty() && !self.chat_id.is_empty()
    }

    fn send_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }

    pub async fn send_text(&self, text: &str) -> Result<()> {
        if !self.is_configured() {
            tracing::warn!(target: "notify", "Telegram not configured (TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID); skipping send");
            return Ok(());
        }

        let payload = SendMessage {
            chat_id: &self.chat_id,
            text,
        };

        // Single attempt; callers treat failure as log-only.
        let rsp = self
            .client
            .post(self.send_url())
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            // the URL embeds the token; keep it out of error strings
            .map_err(|e| anyhow!("Telegram request failed: {}", e.without_url()))?;

        if let Err(e) = rsp.error_for_status_ref() {
            return Err(anyhow!("Telegram HTTP error: {}", e.without_url()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("api_base", &self.api_base)
            .field("chat_id", &self.chat_id)
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, alert: &Alert) -> Result<()> {
        self.send_text(&format_alert(alert)).await
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}
