// src/cooldown.rs
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::collections::HashMap;

/// Backing map from topic to the time of its last dispatched alert.
/// In-memory by default; swap in another store without touching the engine.
pub trait CooldownStore: Send {
    fn last_alert(&self, topic: &str) -> Option<DateTime<Utc>>;
    fn set_last_alert(&mut self, topic: &str, at: DateTime<Utc>);
}

impl CooldownStore for HashMap<String, DateTime<Utc>> {
    fn last_alert(&self, topic: &str) -> Option<DateTime<Utc>> {
        self.get(topic).copied()
    }

    fn set_last_alert(&mut self, topic: &str, at: DateTime<Utc>) {
        self.insert(topic.to_string(), at);
    }
}

/// Per-topic cooldown gate to prevent repeat notifications.
/// - First alert for a topic always allowed.
/// - Inside the cooldown for that topic, alerts are suppressed.
/// - State is updated explicitly via `record_alert` after a dispatch.
pub struct TopicCooldown {
    cooldown: ChronoDuration,
    store: Box<dyn CooldownStore>,
}

impl TopicCooldown {
    /// `cooldown_secs` < 0 is treated as 0 (no cooldown); values past what
    /// `chrono::Duration` can hold saturate to its maximum.
    pub fn new(cooldown_secs: i64) -> Self {
        Self::with_store(cooldown_secs, Box::new(HashMap::new()))
    }

    pub fn with_store(cooldown_secs: i64, store: Box<dyn CooldownStore>) -> Self {
        Self {
            cooldown: ChronoDuration::try_seconds(cooldown_secs.max(0))
                .unwrap_or(ChronoDuration::MAX),
            store,
        }
    }

    /// Check if `topic` may alert at `now`. Does NOT mutate state.
    pub fn should_alert(&self, topic: &str, now: DateTime<Utc>) -> bool {
        match self.store.last_alert(topic) {
            None => true,
            Some(ts) => now.signed_duration_since(ts) >= self.cooldown,
        }
    }

    /// Record that an alert for `topic` was dispatched at `now`.
    pub fn record_alert(&mut self, topic: &str, now: DateTime<Utc>) {
        self.store.set_last_alert(topic, now);
    }

    pub fn last_alert(&self, topic: &str) -> Option<DateTime<Utc>> {
        self.store.last_alert(topic)
    }
}

impl std::fmt::Debug for TopicCooldown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicCooldown")
            .field("cooldown_secs", &self.cooldown.num_seconds())
            .finish_non_exhaustive()
    }
}
