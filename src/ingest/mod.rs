// src/ingest/mod.rs
pub mod rss;
pub mod types;

use std::collections::HashSet;

use crate::ingest::types::{FeedProvider, NewsItem};

/// Summaries are capped so a malformed feed cannot blow up memory.
pub const SUMMARY_MAX_CHARS: usize = 8000;

/// Normalize text pulled out of a feed: decode entities, strip tags,
/// collapse whitespace, trim.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    // 3) Normalize “ ” ‘ ’ « » to ASCII quotes
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace
    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();
    out.trim().to_string()
}

/// Truncate to at most `max` characters (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        s.chars().take(max).collect()
    } else {
        s.to_string()
    }
}

/// Merge per-feed item sequences into one collection with at most one item
/// per distinct link. First occurrence wins; a later duplicate is dropped
/// even if it carries fresher data. Idempotent.
pub fn merge_dedup(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(item.dedup_key()) {
            out.push(item);
        }
    }
    out
}

/// Fetch every feed once, in resolver order, concatenating the results.
/// A provider failure is logged and contributes zero items; it never aborts
/// the remaining feeds.
pub async fn run_once(providers: &[Box<dyn FeedProvider>]) -> Vec<NewsItem> {
    let mut raw = Vec::new();
    for p in providers {
        match p.fetch_latest().await {
            Ok(mut v) => {
                tracing::info!(feed = p.name(), items = v.len(), "feed fetched");
                raw.append(&mut v);
            }
            Err(e) => {
                tracing::warn!(error = ?e, feed = p.name(), "feed error, skipping");
            }
        }
    }
    merge_dedup(raw)
}
