// src/config.rs
//! Process configuration, read once from the environment at startup.

use anyhow::{Context, Result};
use serde::Serialize;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const ENV_FETCH_INTERVAL_SEC: &str = "FETCH_INTERVAL_SEC";
pub const ENV_WINDOW_MINUTES: &str = "WINDOW_MINUTES";
pub const ENV_ALERT_THRESHOLD: &str = "ALERT_THRESHOLD";
pub const ENV_COOLDOWN_MIN: &str = "COOLDOWN_MIN";
pub const ENV_FEED_TIMEOUT_SECS: &str = "FEED_TIMEOUT_SECS";

pub const DEFAULT_FETCH_INTERVAL_SEC: u64 = 180;
pub const DEFAULT_WINDOW_MINUTES: u64 = 60;
pub const DEFAULT_ALERT_THRESHOLD: u32 = 35;
pub const DEFAULT_COOLDOWN_MIN: u64 = 120;
pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 20;

/// Largest cooldown a `chrono::Duration` can hold, in whole minutes.
pub const MAX_COOLDOWN_MIN: u64 = (i64::MAX / 1_000 / 60) as u64;

#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    #[serde(skip)]
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    pub fetch_interval_sec: u64,
    /// Items published earlier than this many minutes ago are not scored; 0 disables.
    pub window_minutes: u64,
    pub alert_threshold: u32,
    pub cooldown_min: u64,
    pub feed_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            telegram_bot_token: String::new(),
            telegram_chat_id: String::new(),
            fetch_interval_sec: DEFAULT_FETCH_INTERVAL_SEC,
            window_minutes: DEFAULT_WINDOW_MINUTES,
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            cooldown_min: DEFAULT_COOLDOWN_MIN,
            feed_timeout_secs: DEFAULT_FEED_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from any key lookup. Unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| {
            lookup(k)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let num = |k: &str, default: u64| parse_or(k, get(k), default);
        let d = Self::default();

        let cooldown_min = num(ENV_COOLDOWN_MIN, d.cooldown_min)?;
        if cooldown_min > MAX_COOLDOWN_MIN {
            anyhow::bail!(
                "invalid value for {ENV_COOLDOWN_MIN}: {cooldown_min} exceeds {MAX_COOLDOWN_MIN} minutes"
            );
        }

        Ok(Self {
            telegram_bot_token: get(ENV_TELEGRAM_BOT_TOKEN).unwrap_or_default(),
            telegram_chat_id: get(ENV_TELEGRAM_CHAT_ID).unwrap_or_default(),
            // zero would spin the loop / time out every fetch instantly
            fetch_interval_sec: num(ENV_FETCH_INTERVAL_SEC, d.fetch_interval_sec)?.max(1),
            window_minutes: num(ENV_WINDOW_MINUTES, d.window_minutes)?,
            alert_threshold: parse_or(
                ENV_ALERT_THRESHOLD,
                get(ENV_ALERT_THRESHOLD),
                d.alert_threshold,
            )?,
            cooldown_min,
            feed_timeout_secs: num(ENV_FEED_TIMEOUT_SECS, d.feed_timeout_secs)?.max(1),
        })
    }

    pub fn fetch_interval(&self) -> Duration {
        Duration::from_secs(self.fetch_interval_sec)
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_secs)
    }

    pub fn cooldown_secs(&self) -> i64 {
        i64::try_from(self.cooldown_min.saturating_mul(60)).unwrap_or(i64::MAX)
    }

    pub fn window_secs(&self) -> u64 {
        self.window_minutes.saturating_mul(60)
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        None => Ok(default),
        Some(s) => s
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {s:?}")),
    }
}
