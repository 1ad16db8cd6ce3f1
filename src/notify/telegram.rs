use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{format_report, Notifier, NotifyError};
use crate::models::SignalReport;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";
/// Client timeout. Must sit above the long-poll window below.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(40);
/// Server-side hold on getUpdates, in seconds.
const POLL_WINDOW_SECS: u64 = 30;
/// Back-off after a failed getUpdates call.
const POLL_RETRY: Duration = Duration::from_secs(5);

const WELCOME: &str = "*MACD Divergence Bot*\n\n\
    Subscribed. Alerts fire when a MACD divergence on the histogram is \
    confirmed by supporting indicators.\n\n\
    Watched:\n\
    \u{2022} MACD (12, 26, 9) histogram divergence\n\
    \u{2022} RSI and Stochastic RSI\n\
    \u{2022} Money Flow Index\n\
    \u{2022} Bollinger %B\n\
    \u{2022} On-Balance Volume trend";

/// Holds the chat that receives alerts. Empty until someone sends /start,
/// so a fresh deployment stays quiet instead of erroring.
#[derive(Debug, Default)]
pub struct ChatRegistry {
    chat_id: Mutex<Option<i64>>,
}

impl ChatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, chat_id: i64) {
        let mut slot = self.chat_id.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(chat_id);
    }

    pub fn current(&self) -> Option<i64> {
        *self.chat_id.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Sends alerts through the Telegram bot API and long-polls for the
/// /start command that picks the destination chat.
pub struct TelegramNotifier {
    client: Client,
    base_url: String,
    token: String,
    registry: ChatRegistry,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>) -> Result<Self, NotifyError> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
            registry: ChatRegistry::new(),
        })
    }

    pub fn registry(&self) -> &ChatRegistry {
        &self.registry
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), NotifyError> {
        let body = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api(format!("sendMessage {status}: {detail}")));
        }
        Ok(())
    }

    async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, NotifyError> {
        let body = json!({
            "offset": offset,
            "timeout": POLL_WINDOW_SECS,
            "allowed_updates": ["message"],
        });
        let response = self
            .client
            .post(self.method_url("getUpdates"))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api(format!("getUpdates {status}: {detail}")));
        }
        let reply: UpdatesReply = response.json().await?;
        if !reply.ok {
            return Err(NotifyError::Api("getUpdates returned ok=false".to_string()));
        }
        Ok(reply.result)
    }

    /// Runs forever. Registers whichever chat most recently sent /start
    /// and answers it with the subscription notice; everything else in
    /// the update stream is ignored.
    pub async fn poll_commands(&self) {
        let mut offset = 0i64;
        loop {
            let updates = match self.get_updates(offset).await {
                Ok(updates) => updates,
                Err(e) => {
                    warn!("getUpdates failed: {e}");
                    tokio::time::sleep(POLL_RETRY).await;
                    continue;
                }
            };
            for update in updates {
                offset = offset.max(update.update_id + 1);
                let Some(message) = update.message else {
                    continue;
                };
                let Some(text) = message.text.as_deref() else {
                    continue;
                };
                if !is_start_command(text) {
                    debug!("ignoring message in chat {}", message.chat.id);
                    continue;
                }
                self.registry.register(message.chat.id);
                info!("chat {} subscribed to alerts", message.chat.id);
                if let Err(e) = self.send_message(message.chat.id, WELCOME).await {
                    warn!("welcome reply failed: {e}");
                }
            }
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, report: &SignalReport) -> Result<(), NotifyError> {
        let Some(chat_id) = self.registry.current() else {
            debug!(
                "no chat registered, dropping alert for {} {}",
                report.pair, report.timeframe
            );
            return Ok(());
        };
        self.send_message(chat_id, &format_report(report)).await
    }
}

fn is_start_command(text: &str) -> bool {
    let head = text.trim().split_whitespace().next().unwrap_or("");
    head == "/start" || head.starts_with("/start@")
}

#[derive(Debug, Deserialize)]
struct UpdatesReply {
    ok: bool,
    #[serde(default)]
    result: Vec<Update>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    chat: Chat,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}
