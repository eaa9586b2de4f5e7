// src/ingest/rss.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use quick_xml::de::from_str;
use serde::Deserialize;
use time::{format_description::well_known::Rfc2822, OffsetDateTime, UtcOffset};

use crate::ingest::types::{FeedEntry, FeedProvider};

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

fn parse_rfc2822_to_unix(ts: &str) -> Option<u64> {
    OffsetDateTime::parse(ts.trim(), &Rfc2822)
        .ok()
        .map(|dt| dt.to_offset(UtcOffset::UTC).unix_timestamp())
        .and_then(|x| u64::try_from(x).ok())
}

/// Parse an RSS 2.0 document into raw entries, preserving item order.
pub fn parse_rss(xml: &str) -> Result<Vec<FeedEntry>> {
    let t0 = std::time::Instant::now();
    let xml_clean = scrub_html_entities_for_xml(xml);
    let rss: Rss = from_str(&xml_clean).context("parsing rss xml")?;

    let out: Vec<FeedEntry> = rss
        .channel
        .item
        .into_iter()
        .map(|it| FeedEntry {
            title: it.title,
            link: it.link,
            published_at: it.pub_date.as_deref().and_then(parse_rfc2822_to_unix),
        })
        .collect();

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("feed_parse_ms").record(ms);
    Ok(out)
}

/// RSS source: either a live URL or an in-memory document (tests, demos).
pub struct RssFeedProvider {
    name: String,
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl RssFeedProvider {
    pub fn from_url(name: &str, url: &str, client: reqwest::Client) -> Self {
        Self {
            name: name.to_string(),
            mode: Mode::Http {
                url: url.to_string(),
                client,
            },
        }
    }

    pub fn from_fixture(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            mode: Mode::Fixture(content.to_string()),
        }
    }
}

#[async_trait]
impl FeedProvider for RssFeedProvider {
    async fn fetch_latest(&self) -> Result<Vec<FeedEntry>> {
        match &self.mode {
            Mode::Fixture(s) => parse_rss(s),
            Mode::Http { url, client } => {
                let body = client
                    .get(url)
                    .send()
                    .await
                    .with_context(|| format!("{} http get()", self.name))?
                    .error_for_status()
                    .with_context(|| format!("{} non-2xx", self.name))?
                    .text()
                    .await
                    .with_context(|| format!("{} http .text()", self.name))?;
                counter!("feed_http_fetches_total").increment(1);
                parse_rss(&body).with_context(|| format!("{} body", self.name))
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// quick-xml rejects HTML-only entities that some publishers leave in titles.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
        .replace("&hellip;", "...")
}
