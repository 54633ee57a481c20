//! Telegram Bot API notifier.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::config::NotificationChannel;
use crate::error::{Result, WarlockError};

use super::dispatcher::Notifier;

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages to one chat through a bot.
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(channel: &NotificationChannel) -> Result<Self> {
        Self::with_api_base(channel, TELEGRAM_API_BASE)
    }

    /// Point the notifier at a different Bot API server
    pub fn with_api_base(channel: &NotificationChannel, api_base: &str) -> Result<Self> {
        if channel.token.trim().is_empty() {
            return Err(WarlockError::config("Telegram bot token is empty"));
        }
        if channel.chat_id.trim().is_empty() {
            return Err(WarlockError::config("Telegram chat_id is empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("warlock/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: channel.token.trim().to_string(),
            chat_id: channel.chat_id.trim().to_string(),
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }

    fn payload<'a>(&'a self, text: &'a str) -> SendMessage<'a> {
        SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: "Markdown",
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_text(&self, text: &str) -> Result<()> {
        let response = self
            .client
            .post(self.send_message_url())
            .json(&self.payload(text))
            .send()
            .await
            // The request URL carries the bot token.
            .map_err(|e| WarlockError::Http(e.without_url()))?;

        let status = response.status();
        let body: Option<ApiResponse> = response.json().await.ok();

        match body {
            Some(ApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(ApiResponse { description, .. }) => Err(WarlockError::notification(format!(
                "Telegram API returned {}: {}",
                status,
                description.unwrap_or_else(|| "no description".to_string())
            ))),
            None => Err(WarlockError::notification(format!(
                "Telegram API returned {} with an unreadable body",
                status
            ))),
        }
    }
}
