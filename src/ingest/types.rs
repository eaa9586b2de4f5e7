// src/ingest/types.rs
use anyhow::Result;

/// One raw entry as parsed from a feed; fields may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published_at: Option<u64>, // unix seconds, if the feed carried a date
}

/// A usable headline: non-empty title and link.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String, // doubles as the dedup identity
    pub published_at: Option<u64>,
}

#[async_trait::async_trait]
pub trait FeedProvider: Send + Sync {
    /// Entries in feed order.
    async fn fetch_latest(&self) -> Result<Vec<FeedEntry>>;
    fn name(&self) -> &str;
}
