//! The detection pipeline: candles in, at most one scored signal out.
//!
//! Every stage is pure. Fetching, delivery and the emission gate live with
//! the scanner; this module only decides whether a history currently shows
//! a divergence and how well it is supported.

pub mod confirm;
pub mod dedup;
pub mod divergence;
pub mod extrema;

pub use confirm::{BASE_STRENGTH, MAX_STRENGTH};
pub use dedup::{should_emit, MemorySignalStore, SignalKey, SignalStore};
pub use divergence::classify;
pub use extrema::{find_extrema, SwingPoint};

use crate::indicators::IndicatorSeries;
use crate::models::{Candle, DivergenceSignal};

/// Runs the full pipeline over one candle history.
///
/// Swing extrema are taken over the candle lows for price and over the MACD
/// histogram, both on the trimmed series. `None` means nothing to report:
/// too little data, nothing survived trimming, or no divergence between the
/// latest swings.
pub fn detect(
    pair: &str,
    timeframe: &str,
    candles: &[Candle],
    swing_window: usize,
) -> Option<DivergenceSignal> {
    let series = IndicatorSeries::from_candles(candles)?;

    let (price_lows, price_highs) = find_extrema(&series.low, swing_window);
    let (hist_lows, hist_highs) = find_extrema(&series.hist, swing_window);
    let (kind, reason) = classify(&price_lows, &price_highs, &hist_lows, &hist_highs)?;

    let mut reasons = vec![reason.to_string()];
    let strength = confirm::score(&series, &mut reasons);

    Some(DivergenceSignal {
        pair: pair.to_string(),
        timeframe: timeframe.to_string(),
        kind,
        strength,
        reasons,
        values: series.latest(),
        timestamp: series.ts[series.len() - 1],
    })
}
