// src/ingest/rss.rs
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::ingest::types::{FeedProvider, NewsItem};
use crate::ingest::{normalize_text, truncate_chars, SUMMARY_MAX_CHARS};

/// Per-feed cap on parsed entries.
pub const MAX_ITEMS_PER_FEED: usize = 50;

// --- RSS 2.0 shape ---

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    title: Option<String>,
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    #[serde(rename = "dc:date")]
    dc_date: Option<String>,
    description: Option<String>,
}

// --- Atom shape ---

#[derive(Debug, Deserialize)]
struct AtomFeed {
    title: Option<TextValue>,
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<TextValue>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    published: Option<String>,
    updated: Option<String>,
    summary: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

/// Atom text constructs carry attributes (`type="html"`), so the value lives
/// in `$text`.
#[derive(Debug, Deserialize)]
struct TextValue {
    #[serde(rename = "$text")]
    value: Option<String>,
}

impl TextValue {
    fn as_str(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }
}

/// Best-effort timestamp parse: RFC 2822 (RSS `pubDate`) then RFC 3339
/// (Atom, and the odd RSS feed that emits ISO dates).
fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    let ts = ts.trim();
    if let Ok(dt) = DateTime::parse_from_rfc2822(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    None
}

/// Derive `(published, published_text)` from raw candidates in preference
/// order. First parseable candidate wins; else the first non-empty raw
/// string is kept for display and the item stays undated (sorts last);
/// else the run start is used for display.
fn derive_published(
    candidates: &[Option<&str>],
    run_start: DateTime<Utc>,
) -> (Option<DateTime<Utc>>, String) {
    for c in candidates.iter().flatten() {
        if let Some(dt) = parse_timestamp(c) {
            return (Some(dt), dt.to_rfc3339());
        }
    }
    for c in candidates.iter().flatten() {
        if !c.trim().is_empty() {
            return (None, c.trim().to_string());
        }
    }
    (None, run_start.to_rfc3339())
}

/// Entities the feeds leak into XML that quick-xml refuses to parse.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}

/// Parse one feed body (RSS 2.0 or Atom) into normalized items.
///
/// Entries without a non-empty title or link are skipped; that is a filter,
/// not an error. At most [`MAX_ITEMS_PER_FEED`] entries are kept.
pub fn parse_feed(xml: &str, feed_url: &str, run_start: DateTime<Utc>) -> Result<Vec<NewsItem>> {
    let xml_clean = scrub_html_entities_for_xml(xml);

    if let Ok(rss) = from_str::<Rss>(&xml_clean) {
        return Ok(items_from_rss(rss, feed_url, run_start));
    }
    match from_str::<AtomFeed>(&xml_clean) {
        Ok(feed) => Ok(items_from_atom(feed, feed_url, run_start)),
        Err(e) => Err(anyhow!(e)).context("parsing feed xml (neither rss nor atom)"),
    }
}

fn items_from_rss(rss: Rss, feed_url: &str, run_start: DateTime<Utc>) -> Vec<NewsItem> {
    let source = rss
        .channel
        .title
        .as_deref()
        .map(normalize_text)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| feed_url.to_string());

    let mut out = Vec::new();
    for it in rss.channel.items.into_iter().take(MAX_ITEMS_PER_FEED) {
        let title = normalize_text(it.title.as_deref().unwrap_or_default());
        let link = it.link.as_deref().unwrap_or_default().trim().to_string();
        if title.is_empty() || link.is_empty() {
            continue;
        }
        let (published, published_text) =
            derive_published(&[it.pub_date.as_deref(), it.dc_date.as_deref()], run_start);
        let summary = truncate_chars(
            &normalize_text(it.description.as_deref().unwrap_or_default()),
            SUMMARY_MAX_CHARS,
        );
        out.push(NewsItem {
            title,
            link,
            published,
            published_text,
            source: source.clone(),
            summary,
            narratives: Vec::new(),
        });
    }
    out
}

fn items_from_atom(feed: AtomFeed, feed_url: &str, run_start: DateTime<Utc>) -> Vec<NewsItem> {
    let source = feed
        .title
        .as_ref()
        .map(|t| normalize_text(t.as_str()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| feed_url.to_string());

    let mut out = Vec::new();
    for entry in feed.entries.into_iter().take(MAX_ITEMS_PER_FEED) {
        let title = entry
            .title
            .as_ref()
            .map(|t| normalize_text(t.as_str()))
            .unwrap_or_default();
        let link = pick_atom_link(&entry.links);
        if title.is_empty() || link.is_empty() {
            continue;
        }
        let (published, published_text) = derive_published(
            &[entry.published.as_deref(), entry.updated.as_deref()],
            run_start,
        );
        let summary = truncate_chars(
            &normalize_text(entry.summary.as_ref().map(|t| t.as_str()).unwrap_or_default()),
            SUMMARY_MAX_CHARS,
        );
        out.push(NewsItem {
            title,
            link,
            published,
            published_text,
            source: source.clone(),
            summary,
            narratives: Vec::new(),
        });
    }
    out
}

/// Prefer the `alternate` (or unmarked) link over `self`/`edit` links.
fn pick_atom_link(links: &[AtomLink]) -> String {
    links
        .iter()
        .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .or_else(|| links.first())
        .and_then(|l| l.href.as_deref())
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// One RSS/Atom endpoint fetched over HTTP.
pub struct RssProvider {
    url: String,
    client: reqwest::Client,
    run_start: DateTime<Utc>,
}

impl RssProvider {
    pub fn new(url: String, client: reqwest::Client, run_start: DateTime<Utc>) -> Self {
        Self {
            url,
            client,
            run_start,
        }
    }
}

#[async_trait]
impl FeedProvider for RssProvider {
    async fn fetch_latest(&self) -> Result<Vec<NewsItem>> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("GET {}", self.url))?
            .error_for_status()
            .with_context(|| format!("non-2xx from {}", self.url))?
            .text()
            .await
            .context("reading feed body")?;
        parse_feed(&body, &self.url, self.run_start)
    }

    fn name(&self) -> &str {
        &self.url
    }
}
