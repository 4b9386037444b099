// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod classify;
pub mod config;
pub mod ingest;
pub mod notify;
pub mod rank;
pub mod report;

// ---- Re-exports for stable public API ----
pub use crate::classify::{Classifier, NarrativeRule, UNCATEGORIZED};
pub use crate::ingest::types::{FeedProvider, NewsItem};
pub use crate::notify::{chunk_text, TelegramNotifier, TELEGRAM_CHUNK_LIMIT};
pub use crate::report::ReportWriter;
