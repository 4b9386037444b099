// src/config.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::classify::NarrativeRule;

const ENV_FEEDS_PATH: &str = "FEEDS_CONFIG_PATH";
const ENV_NARRATIVES_PATH: &str = "NARRATIVES_CONFIG_PATH";

/// Built-in feed list used whenever no usable config file is found.
pub const DEFAULT_FEEDS: &[&str] = &[
    "https://www.coindesk.com/arc/outboundfeeds/rss/",
    "https://cointelegraph.com/rss",
    "https://decrypt.co/feed",
    "https://www.theblock.co/rss.xml",
    "https://bitcoinmagazine.com/.rss/full/",
    "https://blockworks.co/feed",
];

/// Resolve the ordered feed URL list.
///
/// Resolution order: `$FEEDS_CONFIG_PATH`, `config/feeds.toml`,
/// `config/feeds.json`, then [`DEFAULT_FEEDS`]. A missing, malformed, or
/// empty config is never an error; it just falls through to the default.
pub fn resolve_feeds() -> Vec<String> {
    let candidates: Vec<PathBuf> = std::env::var(ENV_FEEDS_PATH)
        .map(|p| vec![PathBuf::from(p)])
        .unwrap_or_else(|_| {
            vec![
                PathBuf::from("config/feeds.toml"),
                PathBuf::from("config/feeds.json"),
            ]
        });

    for path in candidates {
        match load_feeds_from(&path) {
            Ok(feeds) if !feeds.is_empty() => return feeds,
            Ok(_) => {
                tracing::debug!(path = %path.display(), "feed config empty, trying next");
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = ?e, "feed config unusable, trying next");
            }
        }
    }

    DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect()
}

/// Load a feed list from an explicit path. Supports TOML or JSON formats.
pub fn load_feeds_from(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading feed config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_feeds(&content, ext.as_str())
}

fn parse_feeds(s: &str, hint_ext: &str) -> Result<Vec<String>> {
    let try_toml = hint_ext == "toml" || s.contains("feeds") || s.contains("rss");
    if try_toml {
        if let Ok(v) = parse_feeds_toml(s) {
            return Ok(v);
        }
    }
    if let Ok(v) = parse_feeds_json(s) {
        return Ok(v);
    }
    if !try_toml {
        if let Ok(v) = parse_feeds_toml(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported feed config format"))
}

fn parse_feeds_toml(s: &str) -> Result<Vec<String>> {
    // Either `feeds = [...]` or the older `rss = [...]` key.
    #[derive(serde::Deserialize)]
    struct TomlFeeds {
        feeds: Option<Vec<String>>,
        rss: Option<Vec<String>>,
    }
    let v: TomlFeeds = toml::from_str(s)?;
    let list = v
        .feeds
        .or(v.rss)
        .ok_or_else(|| anyhow!("no feeds/rss key"))?;
    Ok(clean_list(list))
}

fn parse_feeds_json(s: &str) -> Result<Vec<String>> {
    let v: Vec<String> = serde_json::from_str(s)?;
    Ok(clean_list(v))
}

/// Trim entries and drop empties, preserving order. Duplicate URLs are kept;
/// the link dedup downstream makes them harmless.
fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .filter_map(|it| {
            let t = it.trim();
            (!t.is_empty()).then(|| t.to_string())
        })
        .collect()
}

/// Load the narrative rule table, falling back to the built-in one.
///
/// Same contract as [`resolve_feeds`]: `$NARRATIVES_CONFIG_PATH`, then
/// `config/narratives.toml`, then [`NarrativeRule::defaults`]. Never fails.
pub fn resolve_narratives() -> Vec<NarrativeRule> {
    let candidates: Vec<PathBuf> = std::env::var(ENV_NARRATIVES_PATH)
        .map(|p| vec![PathBuf::from(p)])
        .unwrap_or_else(|_| vec![PathBuf::from("config/narratives.toml")]);

    for path in candidates {
        match load_narratives_from(&path) {
            Ok(rules) if !rules.is_empty() => return rules,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(path = %path.display(), error = ?e, "narrative config unusable, using defaults");
            }
        }
    }

    NarrativeRule::defaults()
}

pub fn load_narratives_from(path: &Path) -> Result<Vec<NarrativeRule>> {
    #[derive(serde::Deserialize)]
    struct NarrativesFile {
        rules: Vec<NarrativeRule>,
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading narrative rules from {}", path.display()))?;
    let v: NarrativesFile = toml::from_str(&content)?;
    Ok(v.rules
        .into_iter()
        .filter(|r| !r.label.trim().is_empty() && !r.keywords.is_empty())
        .collect())
}
