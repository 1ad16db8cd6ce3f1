//! MACD divergence scanner. Fetches OHLCV history for a grid of pairs and
//! timeframes, trims indicator warm-up, classifies histogram divergences
//! against price swing lows and pushes confirmed alerts to Telegram.

pub mod cli;
pub mod config;
pub mod detect;
pub mod exchange;
pub mod health;
pub mod indicators;
pub mod models;
pub mod notify;
pub mod scanner;

pub use config::ScanConfig;
pub use models::{Candle, DivergenceSignal, SignalKind, SignalReport};
pub use scanner::Scanner;
