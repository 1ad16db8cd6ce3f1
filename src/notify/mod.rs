pub mod telegram;

pub use telegram::{ChatRegistry, TelegramNotifier};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use thiserror::Error;

use crate::models::SignalReport;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("delivery rejected: {0}")]
    Api(String),
}

/// A delivery channel for finished alerts.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, report: &SignalReport) -> Result<(), NotifyError>;
}

/// Renders the alert body. Markdown, matching what Telegram receives; the
/// log notifier prints the same text so both channels read identically.
pub fn format_report(report: &SignalReport) -> String {
    let when = DateTime::<Utc>::from_timestamp_millis(report.timestamp)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| format!("ts {}", report.timestamp));

    let mut msg = format!(
        "*MACD DIVERGENCE DETECTED*\n\n\
         *Pair:* `{}` | *TF:* `{}`\n\
         *Signal:* *{}*\n\
         *Strength:* `{}/{}` ⭐\n\n\
         Price: `{:.6}`\n\
         RSI: `{:.2}` | StochRSI: `{:.2}`\n\
         MFI: `{:.2}` | BB %B: `{:.3}`\n\
         Confirmations:\n",
        report.pair,
        report.timeframe,
        report.kind,
        report.strength,
        report.max_strength,
        report.price,
        report.rsi,
        report.stoch_rsi,
        report.mfi,
        report.pct_b,
    );
    for reason in &report.reasons {
        msg.push_str(&format!("\u{2022} {reason}\n"));
    }
    msg.push_str(&format!("\nTime: `{when}`"));
    msg
}

/// Writes alerts to the log instead of a chat. One-shot scans and
/// simulate mode run with this.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, report: &SignalReport) -> Result<(), NotifyError> {
        info!(
            "[{} {}] {} strength {}/{} ({})",
            report.pair,
            report.timeframe,
            report.kind,
            report.strength,
            report.max_strength,
            report.reasons.join(", ")
        );
        Ok(())
    }
}
