use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;

use super::{CandleSource, FetchError};
use crate::models::Candle;

const DEFAULT_BASE_URL: &str = "https://api.binance.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Binance spot REST client. Only the public klines endpoint is used, so
/// no API key is involved.
#[derive(Debug, Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
}

impl BinanceClient {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Points the client at a different host, used by tests and mirrors.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

/// `BTC/USDT` in exchange notation becomes the API symbol `BTCUSDT`.
fn to_symbol(pair: &str) -> String {
    pair.replace('/', "")
}

#[async_trait]
impl CandleSource for BinanceClient {
    async fn fetch_candles(
        &self,
        pair: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, FetchError> {
        let symbol = to_symbol(pair);
        let limit = limit.to_string();
        let url = format!("{}/api/v3/klines", self.base_url);
        debug!("GET {url} symbol={symbol} interval={timeframe} limit={limit}");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol.as_str()),
                ("interval", timeframe),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
            });
        }

        let rows: Vec<Value> = response.json().await?;
        let mut candles = Vec::with_capacity(rows.len());
        for row in &rows {
            candles.push(parse_kline(row)?);
        }
        Ok(candles)
    }
}

/// One kline row is a JSON array: open time in ms, then OHLCV with the
/// prices and volume encoded as strings.
fn parse_kline(row: &Value) -> Result<Candle, FetchError> {
    let fields = row
        .as_array()
        .ok_or_else(|| FetchError::Malformed("kline row is not an array".to_string()))?;
    if fields.len() < 6 {
        return Err(FetchError::Malformed(format!(
            "kline row has only {} fields",
            fields.len()
        )));
    }
    let timestamp = fields[0]
        .as_i64()
        .ok_or_else(|| FetchError::Malformed("open time is not an integer".to_string()))?;

    Ok(Candle {
        timestamp,
        open: parse_price(&fields[1])?,
        high: parse_price(&fields[2])?,
        low: parse_price(&fields[3])?,
        close: parse_price(&fields[4])?,
        volume: parse_price(&fields[5])?,
    })
}

fn parse_price(value: &Value) -> Result<f64, FetchError> {
    if let Some(s) = value.as_str() {
        if let Ok(v) = s.parse() {
            return Ok(v);
        }
    } else if let Some(v) = value.as_f64() {
        return Ok(v);
    }
    Err(FetchError::Malformed(format!("bad price field: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pair_maps_to_api_symbol() {
        assert_eq!(to_symbol("BTC/USDT"), "BTCUSDT");
        assert_eq!(to_symbol("PAXG/USDT"), "PAXGUSDT");
    }

    #[test]
    fn parses_a_kline_row() {
        let row = json!([
            1700000000000i64,
            "42000.10",
            "42500.00",
            "41800.50",
            "42300.25",
            "1234.567",
            1700003599999i64,
            "52000000.0",
            8500,
            "600.0",
            "25000000.0",
            "0"
        ]);
        let candle = parse_kline(&row).expect("valid row");
        assert_eq!(candle.timestamp, 1_700_000_000_000);
        assert_eq!(candle.open, 42_000.10);
        assert_eq!(candle.high, 42_500.00);
        assert_eq!(candle.low, 41_800.50);
        assert_eq!(candle.close, 42_300.25);
        assert_eq!(candle.volume, 1_234.567);
    }

    #[test]
    fn rejects_non_array_rows() {
        let err = parse_kline(&json!({"open": 1.0})).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn rejects_truncated_rows() {
        let err = parse_kline(&json!([1700000000000i64, "1.0", "2.0"])).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn rejects_unparseable_prices() {
        let row = json!([1700000000000i64, "abc", "2.0", "0.5", "1.5", "10.0"]);
        assert!(matches!(
            parse_kline(&row),
            Err(FetchError::Malformed(_))
        ));
    }
}
