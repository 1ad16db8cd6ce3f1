use serde::Serialize;

use crate::indicators::IndicatorValues;

/// Direction of a detected divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SignalKind {
    Bullish,
    Bearish,
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalKind::Bullish => write!(f, "BULLISH DIVERGENCE"),
            SignalKind::Bearish => write!(f, "BEARISH DIVERGENCE"),
        }
    }
}

/// A scored divergence produced by one scan of a (pair, timeframe) key.
/// Transient: nothing is persisted beyond the dedup map's last-kind entry.
#[derive(Debug, Clone)]
pub struct DivergenceSignal {
    pub pair: String,
    pub timeframe: String,
    pub kind: SignalKind,
    pub strength: u32,
    pub reasons: Vec<String>,
    pub values: IndicatorValues,
    /// Open time of the triggering candle, ms since epoch.
    pub timestamp: i64,
}

/// Strength is displayed out of a fixed 10 regardless of the reachable
/// maximum for the current indicator set.
pub const MAX_DISPLAY_STRENGTH: u32 = 10;

impl DivergenceSignal {
    /// The structured record handed to notification collaborators.
    pub fn report(&self) -> SignalReport {
        SignalReport {
            pair: self.pair.clone(),
            timeframe: self.timeframe.clone(),
            kind: self.kind,
            strength: self.strength,
            max_strength: MAX_DISPLAY_STRENGTH,
            price: self.values.close,
            rsi: self.values.rsi,
            stoch_rsi: self.values.stoch_rsi,
            mfi: self.values.mfi,
            pct_b: self.values.pct_b,
            reasons: self.reasons.clone(),
            timestamp: self.timestamp,
        }
    }
}

/// Flattened alert record: everything a delivery channel needs to render
/// the message. Values are rounded at format time, not here.
#[derive(Debug, Clone, Serialize)]
pub struct SignalReport {
    pub pair: String,
    pub timeframe: String,
    pub kind: SignalKind,
    pub strength: u32,
    pub max_strength: u32,
    pub price: f64,
    pub rsi: f64,
    pub stoch_rsi: f64,
    pub mfi: f64,
    pub pct_b: f64,
    pub reasons: Vec<String>,
    pub timestamp: i64,
}
