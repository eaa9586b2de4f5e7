// tests/common/mod.rs
//
// Shared doubles for engine-level tests: scripted feed providers and a
// notifier that records instead of sending.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::{DateTime, TimeZone, Utc};

use viral_news_watch::ingest::rss::RssFeedProvider;
use viral_news_watch::ingest::types::{FeedEntry, FeedProvider};
use viral_news_watch::{Alert, EngineSettings, Notifier};

pub const BBC_XML: &str = include_str!("../fixtures/bbc_world.xml");
pub const GOOGLE_ES_XML: &str = include_str!("../fixtures/google_es.xml");
pub const ALJAZEERA_XML: &str = include_str!("../fixtures/aljazeera.xml");

/// 2025-09-06 09:00:00 UTC, shortly after the fixture pubDates.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 6, 9, 0, 0).unwrap()
}

pub fn settings() -> EngineSettings {
    EngineSettings {
        threshold: 35,
        cooldown_secs: 120 * 60,
        window_secs: 60 * 60,
        feed_timeout: Duration::from_secs(5),
    }
}

pub fn entry(title: &str, link: &str) -> FeedEntry {
    FeedEntry {
        title: Some(title.to_string()),
        link: Some(link.to_string()),
        published_at: None,
    }
}

pub fn fixture(name: &str, xml: &str) -> Box<dyn FeedProvider> {
    Box::new(RssFeedProvider::from_fixture(name, xml))
}

/// Returns the next scripted batch on each call; empty once exhausted.
pub struct ScriptedProvider {
    batches: Mutex<VecDeque<Vec<FeedEntry>>>,
}

impl ScriptedProvider {
    pub fn new(batches: Vec<Vec<FeedEntry>>) -> Box<dyn FeedProvider> {
        Box::new(Self {
            batches: Mutex::new(batches.into()),
        })
    }
}

#[async_trait::async_trait]
impl FeedProvider for ScriptedProvider {
    async fn fetch_latest(&self) -> Result<Vec<FeedEntry>> {
        Ok(self.batches.lock().unwrap().pop_front().unwrap_or_default())
    }
    fn name(&self) -> &str {
        "scripted"
    }
}

pub struct FailingProvider;

pub fn failing() -> Box<dyn FeedProvider> {
    Box::new(FailingProvider)
}

pub fn slow(delay: Duration) -> Box<dyn FeedProvider> {
    Box::new(SlowProvider(delay))
}

#[async_trait::async_trait]
impl FeedProvider for FailingProvider {
    async fn fetch_latest(&self) -> Result<Vec<FeedEntry>> {
        Err(anyhow!("connection refused"))
    }
    fn name(&self) -> &str {
        "failing"
    }
}

pub struct SlowProvider(pub Duration);

#[async_trait::async_trait]
impl FeedProvider for SlowProvider {
    async fn fetch_latest(&self) -> Result<Vec<FeedEntry>> {
        tokio::time::sleep(self.0).await;
        Ok(vec![entry("Breaking: URGENT war explosion", "https://slow/1")])
    }
    fn name(&self) -> &str {
        "slow"
    }
}

/// Records every alert; optionally reports delivery failure after recording.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Alert>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn links(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|a| a.link.clone()).collect()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, alert: &Alert) -> Result<()> {
        self.sent.lock().unwrap().push(alert.clone());
        if self.fail {
            return Err(anyhow!("telegram 502"));
        }
        Ok(())
    }
}
