// src/notify/telegram.rs
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::multipart;
use reqwest::Client;

/// Telegram Bot API client. Credentials come from `BOT_TOKEN` + `CHAT_ID`;
/// when either is missing every send is a deliberate silent no-op, so the
/// pipeline works unchanged without a configured chat.
pub struct TelegramNotifier {
    creds: Option<Creds>,
    client: Client,
    api_base: String,
}

struct Creds {
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn from_env() -> Self {
        let token = std::env::var("BOT_TOKEN").ok().filter(|s| !s.is_empty());
        let chat_id = std::env::var("CHAT_ID").ok().filter(|s| !s.is_empty());
        let creds = match (token, chat_id) {
            (Some(token), Some(chat_id)) => Some(Creds { token, chat_id }),
            _ => None,
        };
        Self::with_creds(creds)
    }

    /// Builder for tests/tools.
    pub fn new(token: String, chat_id: String) -> Self {
        Self::with_creds(Some(Creds { token, chat_id }))
    }

    /// A notifier that is guaranteed to no-op.
    pub fn disabled() -> Self {
        Self::with_creds(None)
    }

    fn with_creds(creds: Option<Creds>) -> Self {
        Self {
            creds,
            client: Client::builder()
                .timeout(Duration::from_secs(20))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_base: "https://api.telegram.org".to_string(),
        }
    }

    /// Point at a different API host (test servers).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.creds.is_some()
    }

    fn endpoint(&self, creds: &Creds, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, creds.token, method)
    }

    /// Send one text message. Caller is responsible for chunking long text
    /// below the transport cap first.
    pub async fn send_message(&self, text: &str) -> Result<()> {
        let Some(creds) = &self.creds else {
            tracing::debug!("telegram disabled (no BOT_TOKEN/CHAT_ID)");
            return Ok(());
        };

        self.client
            .post(self.endpoint(creds, "sendMessage"))
            .form(&[
                ("chat_id", creds.chat_id.as_str()),
                ("text", text),
                ("disable_web_page_preview", "true"),
            ])
            .send()
            .await
            .context("telegram sendMessage post")?
            .error_for_status()
            .context("telegram sendMessage non-2xx")?;
        Ok(())
    }

    /// Upload a file with an optional caption.
    pub async fn send_document(&self, path: &Path, caption: Option<&str>) -> Result<()> {
        let Some(creds) = &self.creds else {
            tracing::debug!("telegram disabled (no BOT_TOKEN/CHAT_ID)");
            return Ok(());
        };

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("report")
            .to_string();

        let form = multipart::Form::new()
            .text("chat_id", creds.chat_id.clone())
            .text("caption", caption.unwrap_or_default().to_string())
            .part("document", multipart::Part::bytes(bytes).file_name(file_name));

        self.client
            .post(self.endpoint(creds, "sendDocument"))
            .multipart(form)
            .send()
            .await
            .context("telegram sendDocument post")?
            .error_for_status()
            .context("telegram sendDocument non-2xx")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_credentials_noop_ok() {
        let n = TelegramNotifier::disabled();
        assert!(!n.is_enabled());
        assert!(n.send_message("hello").await.is_ok());
        // A nonexistent path would fail the read, but the no-op short-circuits first.
        assert!(n
            .send_document(Path::new("/definitely/not/here.csv"), Some("cap"))
            .await
            .is_ok());
    }
}
