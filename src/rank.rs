// src/rank.rs
use std::collections::HashMap;

use crate::ingest::types::NewsItem;

/// How many narrative lines the digest shows.
pub const TOP_NARRATIVES: usize = 6;

/// Sort newest-first by publish time. Undated items go after every dated
/// one; the sort is stable, so ties and undated items keep their input
/// order.
pub fn rank_newest_first(items: &mut [NewsItem]) {
    items.sort_by(|a, b| match (a.published, b.published) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Label → item count, descending by count with an alphabetical tie-break,
/// truncated to `top`.
pub fn narrative_counts(items: &[NewsItem], top: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        for label in &item.narratives {
            *counts.entry(label.as_str()).or_insert(0) += 1;
        }
    }
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out.truncate(top);
    out
}
