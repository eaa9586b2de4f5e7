//! # Alert Engine
//! One cycle: fetch → dedup → classify/score → threshold → top-N → cooldown → dispatch.
//!
//! Dedup and cooldown state live in `EngineState`, owned by the engine and
//! guarded by a single async mutex held for the whole cycle, so the background
//! loop and an on-demand trigger never interleave.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::analyze::assess;
use crate::config::AppConfig;
use crate::cooldown::TopicCooldown;
use crate::dedup::SeenStore;
use crate::ingest::{self, types::FeedItem, types::FeedProvider};
use crate::notify::{Alert, Notifier};

/// Upper bound on alerts considered per cycle.
pub const MAX_ALERTS_PER_CYCLE: usize = 5;

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("engine_candidates_total", "Items that cleared the threshold.");
        describe_counter!("alerts_sent_total", "Alerts handed to the notifier.");
        describe_counter!(
            "alerts_suppressed_total",
            "Selected alerts skipped by the topic cooldown."
        );
        describe_counter!("notify_errors_total", "Notifier delivery failures.");
        describe_counter!(
            "engine_stale_total",
            "Unseen items skipped for being older than the viral window."
        );
        describe_gauge!("engine_seen_links", "Links in the dedup cache.");
        describe_gauge!("engine_last_cycle_ts", "Unix ts when the last cycle finished.");
    });
}

#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    pub threshold: u32,
    pub cooldown_secs: i64,
    /// 0 disables the viral window.
    pub window_secs: u64,
    pub feed_timeout: Duration,
}

impl From<&AppConfig> for EngineSettings {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            threshold: cfg.alert_threshold,
            cooldown_secs: cfg.cooldown_secs(),
            window_secs: cfg.window_secs(),
            feed_timeout: cfg.feed_timeout(),
        }
    }
}

/// Mutable per-process state.
pub struct EngineState {
    pub seen: Box<dyn SeenStore>,
    pub cooldown: TopicCooldown,
}

impl EngineState {
    pub fn in_memory(cooldown_secs: i64) -> Self {
        Self {
            seen: Box::new(HashSet::<String>::new()),
            cooldown: TopicCooldown::new(cooldown_secs),
        }
    }
}

/// Outcome of one cycle. `candidates` is the selected top-N regardless of
/// how many were dispatched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CycleReport {
    pub fetched: usize,
    pub fresh: usize,
    pub stale: usize,
    pub candidates: Vec<Alert>,
    pub dispatched: usize,
    pub suppressed: usize,
    pub failed: usize,
}

pub struct AlertEngine {
    providers: Vec<Box<dyn FeedProvider>>,
    notifier: Arc<dyn Notifier>,
    settings: EngineSettings,
    state: Mutex<EngineState>,
}

impl AlertEngine {
    pub fn new(
        providers: Vec<Box<dyn FeedProvider>>,
        notifier: Arc<dyn Notifier>,
        settings: EngineSettings,
    ) -> Self {
        let state = EngineState::in_memory(settings.cooldown_secs);
        Self::with_state(providers, notifier, settings, state)
    }

    pub fn with_state(
        providers: Vec<Box<dyn FeedProvider>>,
        notifier: Arc<dyn Notifier>,
        settings: EngineSettings,
        state: EngineState,
    ) -> Self {
        Self {
            providers,
            notifier,
            settings,
            state: Mutex::new(state),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    pub async fn seen_count(&self) -> usize {
        self.state.lock().await.seen.len()
    }

    pub async fn run_cycle(&self) -> CycleReport {
        self.run_cycle_at(Utc::now()).await
    }

    /// Run one cycle treating `now` as the current time.
    pub async fn run_cycle_at(&self, now: DateTime<Utc>) -> CycleReport {
        ensure_metrics_described();
        let mut state = self.state.lock().await;

        let items = ingest::fetch_all(&self.providers, self.settings.feed_timeout).await;
        let mut report = CycleReport {
            fetched: items.len(),
            ..Default::default()
        };

        let mut qualifying = Vec::new();
        for it in items {
            // marked seen before scoring, whatever the outcome
            if !state.seen.insert(&it.link) {
                continue;
            }
            report.fresh += 1;

            if self.is_stale(&it, now) {
                report.stale += 1;
                continue;
            }

            let a = assess(&it.title);
            if a.score >= self.settings.threshold {
                qualifying.push(Alert {
                    score: a.score,
                    topic: a.topic.to_string(),
                    title: it.title,
                    link: it.link,
                });
            }
        }
        counter!("engine_candidates_total").increment(qualifying.len() as u64);
        counter!("engine_stale_total").increment(report.stale as u64);

        report.candidates = select_top(qualifying, MAX_ALERTS_PER_CYCLE);

        for alert in &report.candidates {
            if !state.cooldown.should_alert(&alert.topic, now) {
                tracing::debug!(
                    target: "engine",
                    topic = %alert.topic,
                    score = alert.score,
                    "suppressed by topic cooldown"
                );
                report.suppressed += 1;
                continue;
            }

            if let Err(e) = self.notifier.send(alert).await {
                tracing::warn!(target: "engine", error = %e, topic = %alert.topic, "alert delivery failed");
                counter!("notify_errors_total").increment(1);
                report.failed += 1;
            }
            // fire-and-forget: the topic cools down even if delivery failed
            state.cooldown.record_alert(&alert.topic, now);
            report.dispatched += 1;
        }

        counter!("alerts_sent_total").increment(report.dispatched as u64);
        counter!("alerts_suppressed_total").increment(report.suppressed as u64);
        gauge!("engine_seen_links").set(state.seen.len() as f64);
        gauge!("engine_last_cycle_ts").set(now.timestamp() as f64);

        tracing::info!(
            target: "engine",
            fetched = report.fetched,
            fresh = report.fresh,
            stale = report.stale,
            candidates = report.candidates.len(),
            dispatched = report.dispatched,
            suppressed = report.suppressed,
            "cycle done"
        );
        report
    }

    fn is_stale(&self, item: &FeedItem, now: DateTime<Utc>) -> bool {
        if self.settings.window_secs == 0 {
            return false;
        }
        let Some(published) = item.published_at else {
            return false;
        };
        let now_ts = now.timestamp().max(0) as u64;
        now_ts.saturating_sub(published) > self.settings.window_secs
    }
}

/// Stable sort by score descending (ties keep fetch order), keep the first `n`.
pub fn select_top(mut alerts: Vec<Alert>, n: usize) -> Vec<Alert> {
    alerts.sort_by(|a, b| b.score.cmp(&a.score));
    alerts.truncate(n);
    alerts
}
