//! narasi-agent — Binary Entrypoint
//! One-shot run: fetch the configured crypto feeds, dedup and classify the
//! items into narratives, write the daily CSV + digest, and push both to
//! Telegram when credentials are present. Meant to be invoked once a day by
//! an external scheduler.

use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use narasi_agent::classify::Classifier;
use narasi_agent::config;
use narasi_agent::ingest::rss::RssProvider;
use narasi_agent::ingest::types::FeedProvider;
use narasi_agent::notify::{chunk_text, TelegramNotifier, TELEGRAM_CHUNK_LIMIT};
use narasi_agent::rank::{narrative_counts, rank_newest_first, TOP_NARRATIVES};
use narasi_agent::report::{render_links, ReportWriter, MAX_LINK_LINES};
use narasi_agent::{ingest, report};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("narasi_agent=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let run_started = Utc::now();
    let date = run_started.date_naive();

    // --- Resolve feeds + rules (missing config falls back silently) ---
    let feeds = config::resolve_feeds();
    let classifier = Classifier::new(config::resolve_narratives());
    tracing::info!(feeds = feeds.len(), "starting run");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(20))
        .user_agent(concat!("narasi-agent/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let providers: Vec<Box<dyn FeedProvider>> = feeds
        .into_iter()
        .map(|url| Box::new(RssProvider::new(url, client.clone(), run_started)) as Box<dyn FeedProvider>)
        .collect();

    // --- Fetch → dedup → classify → rank ---
    let mut items = ingest::run_once(&providers).await;
    classifier.classify_all(&mut items);
    rank_newest_first(&mut items);
    let counts = narrative_counts(&items, TOP_NARRATIVES);
    tracing::info!(items = items.len(), "pipeline done");

    // --- Render reports (directory/write failures are the fatal path) ---
    let reports_dir = std::env::var("REPORTS_DIR").unwrap_or_else(|_| "reports".to_string());
    let writer = ReportWriter::new(reports_dir)?;
    let csv_path = writer.write_csv(date, &items)?;
    let digest_path = writer.write_digest(date, run_started, &items, &counts)?;
    tracing::info!(csv = %csv_path.display(), digest = %digest_path.display(), "reports written");

    // --- Notify (silent no-op without BOT_TOKEN/CHAT_ID; send failures
    //     are logged, never fatal) ---
    let notifier = TelegramNotifier::from_env();
    if notifier.is_enabled() {
        // Send the newest files on disk, like the cron flow expects; for a
        // normal run these are the ones written above.
        let dir = csv_path
            .parent()
            .map(std::path::Path::to_path_buf)
            .unwrap_or_else(|| std::path::PathBuf::from("."));
        let digest_to_send = report::latest_report(&dir, "-summary.txt").unwrap_or(digest_path);
        let csv_to_send = report::latest_report(&dir, "-report.csv").unwrap_or(csv_path);

        let digest = std::fs::read_to_string(&digest_to_send).unwrap_or_default();
        for part in chunk_text(&digest, TELEGRAM_CHUNK_LIMIT) {
            if let Err(e) = notifier.send_message(&part).await {
                tracing::error!(error = ?e, "telegram sendMessage failed");
            }
        }
        for part in chunk_text(&render_links(&items, MAX_LINK_LINES), TELEGRAM_CHUNK_LIMIT) {
            if let Err(e) = notifier.send_message(&part).await {
                tracing::error!(error = ?e, "telegram sendMessage failed");
            }
        }
        let caption = format!("📊 Laporan CSV ({date})");
        if let Err(e) = notifier.send_document(&csv_to_send, Some(&caption)).await {
            tracing::error!(error = ?e, "telegram sendDocument failed");
        }
    } else {
        tracing::info!("telegram credentials absent, skipping notification");
    }

    Ok(())
}
