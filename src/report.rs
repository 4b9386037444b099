//! Per-run report files: a CSV table and a plain-text digest, both named by
//! the run's UTC date stamp. Rerunning on the same day overwrites both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};

use crate::ingest::types::NewsItem;

/// How many item citations the digest samples.
pub const DIGEST_SAMPLE: usize = 8;

/// Cap on the numbered link list sent to the chat.
pub const MAX_LINK_LINES: usize = 25;

pub const CSV_HEADER: &str = "published_utc,narrative,title,source,link";

/// Placeholder written when a run produced zero items.
pub const NO_DATA_LINE: &str = "Tidak ada berita untuk hari ini.";

pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    /// Creating the reports directory is the one fatal path of a run.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating reports directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn csv_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}-report.csv", date.format("%Y-%m-%d")))
    }

    pub fn digest_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}-summary.txt", date.format("%Y-%m-%d")))
    }

    /// Write the tabular report. One row per item; an empty run still gets
    /// the header row.
    pub fn write_csv(&self, date: NaiveDate, items: &[NewsItem]) -> Result<PathBuf> {
        let path = self.csv_path(date);
        let mut out = String::from(CSV_HEADER);
        out.push('\n');
        for item in items {
            out.push_str(&csv_row(item));
            out.push('\n');
        }
        fs::write(&path, out).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    /// Write the text digest: header, top-narrative lines, then a bounded
    /// sample of citations. Empty input is not an error; it writes the
    /// explicit no-data placeholder.
    pub fn write_digest(
        &self,
        date: NaiveDate,
        run_started: DateTime<Utc>,
        items: &[NewsItem],
        counts: &[(String, usize)],
    ) -> Result<PathBuf> {
        let path = self.digest_path(date);
        let body = render_digest(run_started, items, counts);
        fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

pub fn render_digest(
    run_started: DateTime<Utc>,
    items: &[NewsItem],
    counts: &[(String, usize)],
) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "📰 Narasi Agent Report ({})",
        run_started.format("%Y-%m-%d %H:%M UTC")
    ));
    lines.push(String::new());

    if items.is_empty() {
        lines.push(NO_DATA_LINE.to_string());
        lines.push(String::new());
        return lines.join("\n");
    }

    lines.push("Narasi teratas:".to_string());
    for (label, count) in counts {
        lines.push(format!("- {label}: {count} sumber"));
    }
    lines.push(String::new());

    lines.push("Berita pilihan:".to_string());
    for item in items.iter().take(DIGEST_SAMPLE) {
        lines.push(format!("{} ({})", item.title, item.source));
        lines.push(format!("  {}", item.link));
    }
    lines.push(String::new());
    lines.join("\n")
}

fn csv_row(item: &NewsItem) -> String {
    [
        item.published_text.as_str(),
        &item.narratives.join("|"),
        &item.title,
        &item.source,
        &item.link,
    ]
    .iter()
    .map(|f| csv_escape(f))
    .collect::<Vec<_>>()
    .join(",")
}

/// RFC 4180 quoting: wrap when the field contains a comma, quote, or
/// newline; double any embedded quotes.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Numbered link list for the notification channel, capped at `max_items`
/// with a trailer naming how many were left out.
pub fn render_links(items: &[NewsItem], max_items: usize) -> String {
    let mut lines = vec!["🔗 Berita terbaru:".to_string()];
    if items.is_empty() {
        lines.push(NO_DATA_LINE.to_string());
        return lines.join("\n");
    }
    for (i, item) in items.iter().take(max_items).enumerate() {
        lines.push(format!("{}. {} ({})", i + 1, item.title, item.source));
        lines.push(format!("   {}", item.link));
    }
    if items.len() > max_items {
        lines.push(format!(
            "…dan {} link lainnya (lihat CSV penuh).",
            items.len() - max_items
        ));
    }
    lines.join("\n")
}

/// Path of the most recent file in `dir` matching `*<suffix>`, by name
/// order (names start with the date stamp, so name order is date order).
pub fn latest_report(dir: &Path, suffix: &str) -> Option<PathBuf> {
    let mut matches: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(suffix))
        })
        .collect();
    matches.sort();
    matches.pop()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, link: &str, narratives: &[&str]) -> NewsItem {
        NewsItem {
            title: title.into(),
            link: link.into(),
            published: None,
            published_text: "2026-08-29T00:00:00+00:00".into(),
            source: "Feed".into(),
            summary: String::new(),
            narratives: narratives.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn csv_escapes_commas_and_quotes() {
        let it = item(r#"Bit "win", maybe"#, "http://x/1", &["Bitcoin"]);
        let row = csv_row(&it);
        assert_eq!(
            row,
            r#"2026-08-29T00:00:00+00:00,Bitcoin,"Bit ""win"", maybe",Feed,http://x/1"#
        );
    }

    #[test]
    fn empty_digest_has_placeholder() {
        let d = render_digest(Utc::now(), &[], &[]);
        assert!(d.contains(NO_DATA_LINE));
    }

    #[test]
    fn digest_counts_use_sumber_lines() {
        let items = vec![item("A", "http://x/1", &["Bitcoin"])];
        let counts = vec![("Bitcoin".to_string(), 1)];
        let d = render_digest(Utc::now(), &items, &counts);
        assert!(d.contains("- Bitcoin: 1 sumber"));
        assert!(d.contains("A (Feed)\n  http://x/1"));
    }

    #[test]
    fn links_list_caps_and_counts_the_rest() {
        let items: Vec<NewsItem> = (0..30)
            .map(|i| item(&format!("T{i}"), &format!("http://x/{i}"), &[]))
            .collect();
        let msg = render_links(&items, 25);
        assert!(msg.contains("25. T24"));
        assert!(!msg.contains("T25 ("));
        assert!(msg.contains("…dan 5 link lainnya"));
    }
}
