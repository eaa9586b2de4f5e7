// src/ingest/mod.rs
pub mod rss;
pub mod types;

use crate::ingest::rss::RssFeedProvider;
use crate::ingest::types::{FeedEntry, FeedItem, FeedProvider};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use std::time::{Duration, Instant};

/// Per-source cap on entries considered each cycle.
pub const MAX_ENTRIES_PER_FEED: usize = 25;

/// Sources polled every cycle, in order.
pub const DEFAULT_FEEDS: &[(&str, &str)] = &[
    (
        "Google News ES",
        "https://news.google.com/rss?hl=es-419&gl=US&ceid=US:es-419",
    ),
    (
        "Google News EN",
        "https://news.google.com/rss?hl=en-US&gl=US&ceid=US:en",
    ),
    ("BBC World", "https://feeds.bbci.co.uk/news/world/rss.xml"),
    ("Al Jazeera", "https://www.aljazeera.com/xml/rss/all.xml"),
];

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("feed_items_total", "Usable items extracted from feeds.");
        describe_counter!(
            "feed_dropped_total",
            "Entries dropped for a missing title or link."
        );
        describe_counter!(
            "feed_http_fetches_total",
            "Feed documents fetched over HTTP."
        );
        describe_counter!(
            "feed_provider_errors_total",
            "Feed fetch/parse errors and timeouts."
        );
        describe_histogram!("feed_fetch_ms", "Per-source fetch+parse time in milliseconds.");
        describe_histogram!("feed_parse_ms", "RSS parse time in milliseconds.");
    });
}

/// Build HTTP providers for `DEFAULT_FEEDS` sharing one client.
pub fn default_providers(client: &reqwest::Client) -> Vec<Box<dyn FeedProvider>> {
    DEFAULT_FEEDS
        .iter()
        .map(|(name, url)| {
            Box::new(RssFeedProvider::from_url(name, url, client.clone())) as Box<dyn FeedProvider>
        })
        .collect()
}

/// Decode stray HTML entities and trim. Returns `None` when nothing is left.
fn clean_field(raw: Option<&str>) -> Option<String> {
    let decoded = html_escape::decode_html_entities(raw?.trim()).trim().to_string();
    (!decoded.is_empty()).then_some(decoded)
}

/// Keep the first `MAX_ENTRIES_PER_FEED` entries, then drop those lacking a
/// title or link. Order is preserved.
pub fn extract_items(entries: Vec<FeedEntry>) -> (Vec<FeedItem>, usize) {
    let mut dropped = 0usize;
    let mut out = Vec::with_capacity(entries.len().min(MAX_ENTRIES_PER_FEED));
    for e in entries.into_iter().take(MAX_ENTRIES_PER_FEED) {
        let title = clean_field(e.title.as_deref());
        let link = e.link.as_deref().map(str::trim).filter(|s| !s.is_empty());
        match (title, link) {
            (Some(title), Some(link)) => out.push(FeedItem {
                title,
                link: link.to_string(),
                published_at: e.published_at,
            }),
            _ => dropped += 1,
        }
    }
    (out, dropped)
}

/// Fetch every provider in order. A failing or slow provider is logged and
/// skipped; it never aborts the batch.
pub async fn fetch_all(providers: &[Box<dyn FeedProvider>], timeout: Duration) -> Vec<FeedItem> {
    ensure_metrics_described();

    let mut all = Vec::new();
    for p in providers {
        let t0 = Instant::now();
        let res = tokio::time::timeout(timeout, p.fetch_latest()).await;
        histogram!("feed_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

        let entries = match res {
            Ok(Ok(v)) => v,
            Ok(Err(e)) => {
                tracing::warn!(target: "ingest", error = ?e, provider = p.name(), "provider error");
                counter!("feed_provider_errors_total").increment(1);
                continue;
            }
            Err(_) => {
                tracing::warn!(
                    target: "ingest",
                    provider = p.name(),
                    timeout_ms = timeout.as_millis() as u64,
                    "provider timed out"
                );
                counter!("feed_provider_errors_total").increment(1);
                continue;
            }
        };

        let (mut items, dropped) = extract_items(entries);
        tracing::debug!(
            target: "ingest",
            provider = p.name(),
            kept = items.len(),
            dropped,
            "provider fetched"
        );
        counter!("feed_items_total").increment(items.len() as u64);
        counter!("feed_dropped_total").increment(dropped as u64);
        all.append(&mut items);
    }
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: Option<&str>, link: Option<&str>) -> FeedEntry {
        FeedEntry {
            title: title.map(Into::into),
            link: link.map(Into::into),
            published_at: None,
        }
    }

    #[test]
    fn drops_entries_missing_fields() {
        let entries = vec![
            entry(Some("ok"), Some("https://a")),
            entry(None, Some("https://b")),
            entry(Some("no link"), None),
            entry(Some("   "), Some("https://c")),
            entry(Some("blank link"), Some("  ")),
        ];
        let (items, dropped) = extract_items(entries);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].link, "https://a");
        assert_eq!(dropped, 4);
    }

    #[test]
    fn caps_at_25_before_filtering() {
        let mut entries: Vec<FeedEntry> = (0..25).map(|_| entry(None, None)).collect();
        entries.push(entry(Some("26th"), Some("https://late")));
        let (items, dropped) = extract_items(entries);
        assert!(items.is_empty());
        assert_eq!(dropped, 25);
    }

    #[test]
    fn trims_and_decodes_titles() {
        let (items, _) = extract_items(vec![entry(
            Some("  Tom &amp; Jerry&#39;s war  "),
            Some(" https://x "),
        )]);
        assert_eq!(items[0].title, "Tom & Jerry's war");
        assert_eq!(items[0].link, "https://x");
    }
}
