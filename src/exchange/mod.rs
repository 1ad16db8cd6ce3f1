pub mod binance;
pub mod simulator;

pub use binance::BinanceClient;
pub use simulator::SimulatedSource;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Candle;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("exchange returned status {code}")]
    Status { code: u16 },
    #[error("malformed candle payload: {0}")]
    Malformed(String),
}

/// Anything that can produce an OHLCV history for a (pair, timeframe) key.
/// Candles come back oldest first, at most `limit` of them.
#[async_trait]
pub trait CandleSource: Send + Sync {
    async fn fetch_candles(
        &self,
        pair: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, FetchError>;
}
