// src/ingest/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};

/// One normalized news item. The lowercased `link` is the global dedup key
/// for a run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    /// Parsed publish instant; `None` when the feed gave nothing parseable.
    pub published: Option<DateTime<Utc>>,
    /// Always displayable: RFC 3339 of `published`, the raw feed string, or
    /// the run start.
    pub published_text: String,
    pub source: String,
    pub summary: String,
    /// Assigned by the classifier; never empty after classification.
    #[serde(default)]
    pub narratives: Vec<String>,
}

impl NewsItem {
    /// Dedup key: link, trimmed and lowercased.
    pub fn dedup_key(&self) -> String {
        self.link.trim().to_lowercase()
    }
}

#[async_trait::async_trait]
pub trait FeedProvider: Send + Sync {
    async fn fetch_latest(&self) -> Result<Vec<NewsItem>>;
    fn name(&self) -> &str;
}
