//! Batch indicator computation over a candle history.
//!
//! Every indicator returns a candle-aligned `Vec<f64>` with NaN in warm-up
//! or otherwise undefined rows. [`IndicatorSeries::from_candles`] runs the
//! whole set, drops every row still carrying a NaN and re-indexes, so
//! downstream consumers only ever see fully defined rows.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod mfi;
pub mod obv;
pub mod rsi;

pub use bollinger::percent_b;
pub use ema::ema;
pub use macd::{macd, MacdOutput};
pub use mfi::mfi;
pub use obv::obv;
pub use rsi::{rsi, stoch_rsi};

use crate::models::Candle;

pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const RSI_WINDOW: usize = 14;
pub const STOCH_WINDOW: usize = 14;
pub const STOCH_SMOOTH: usize = 3;
pub const MFI_WINDOW: usize = 14;
pub const BB_WINDOW: usize = 5;
pub const BB_STD: f64 = 2.0;

/// Minimum candle history before any computation is attempted.
pub const MIN_CANDLES: usize = 100;
/// Minimum rows that must survive warm-up trimming.
pub const MIN_READY_ROWS: usize = 50;

fn rolling(values: &[f64], window: usize, f: impl Fn(&[f64]) -> f64) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if window == 0 {
        return out;
    }
    for i in (window - 1)..values.len() {
        let slice = &values[i + 1 - window..=i];
        if slice.iter().all(|v| v.is_finite()) {
            out[i] = f(slice);
        }
    }
    out
}

pub(crate) fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |s| s.iter().sum::<f64>() / s.len() as f64)
}

pub(crate) fn rolling_std_pop(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |s| {
        let mean = s.iter().sum::<f64>() / s.len() as f64;
        let var = s.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / s.len() as f64;
        var.sqrt()
    })
}

pub(crate) fn rolling_min(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |s| s.iter().copied().fold(f64::INFINITY, f64::min))
}

pub(crate) fn rolling_max(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |s| {
        s.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

/// The latest fully defined indicator row, snapshotted for scoring and
/// display.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorValues {
    pub close: f64,
    pub rsi: f64,
    pub stoch_rsi: f64,
    pub mfi: f64,
    pub pct_b: f64,
    pub obv: f64,
}

/// Parallel indicator columns plus the candle columns consumed downstream,
/// all equal length with warm-up rows removed and indices running from 0.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSeries {
    pub ts: Vec<i64>,
    pub close: Vec<f64>,
    pub low: Vec<f64>,
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub hist: Vec<f64>,
    pub rsi: Vec<f64>,
    pub stoch_rsi: Vec<f64>,
    pub mfi: Vec<f64>,
    pub obv: Vec<f64>,
    pub pct_b: Vec<f64>,
}

impl IndicatorSeries {
    /// Computes the full indicator set and trims undefined rows.
    ///
    /// Returns `None` when the history is shorter than [`MIN_CANDLES`] or
    /// fewer than [`MIN_READY_ROWS`] rows survive trimming. Both are soft
    /// outcomes, not errors: the caller simply skips this history.
    pub fn from_candles(candles: &[Candle]) -> Option<IndicatorSeries> {
        if candles.len() < MIN_CANDLES {
            return None;
        }

        let close: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let m = macd(&close, MACD_FAST, MACD_SLOW, MACD_SIGNAL);
        let rsi_col = rsi(&close, RSI_WINDOW);
        let stoch_col = stoch_rsi(&rsi_col, STOCH_WINDOW, STOCH_SMOOTH);
        let mfi_col = mfi(candles, MFI_WINDOW);
        let obv_col = obv(candles);
        let pct_b_col = percent_b(&close, BB_WINDOW, BB_STD);

        let mut out = IndicatorSeries::default();
        for i in 0..candles.len() {
            let defined = [
                m.macd[i],
                m.signal[i],
                m.hist[i],
                rsi_col[i],
                stoch_col[i],
                mfi_col[i],
                obv_col[i],
                pct_b_col[i],
            ]
            .iter()
            .all(|v| v.is_finite());
            if !defined {
                continue;
            }
            out.ts.push(candles[i].timestamp);
            out.close.push(close[i]);
            out.low.push(candles[i].low);
            out.macd.push(m.macd[i]);
            out.signal.push(m.signal[i]);
            out.hist.push(m.hist[i]);
            out.rsi.push(rsi_col[i]);
            out.stoch_rsi.push(stoch_col[i]);
            out.mfi.push(mfi_col[i]);
            out.obv.push(obv_col[i]);
            out.pct_b.push(pct_b_col[i]);
        }

        if out.len() < MIN_READY_ROWS {
            return None;
        }
        Some(out)
    }

    pub fn len(&self) -> usize {
        self.ts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ts.is_empty()
    }

    /// Snapshot of the last row. Construction guarantees at least
    /// [`MIN_READY_ROWS`] rows, so the last row always exists.
    pub fn latest(&self) -> IndicatorValues {
        let i = self.len() - 1;
        IndicatorValues {
            close: self.close[i],
            rsi: self.rsi[i],
            stoch_rsi: self.stoch_rsi[i],
            mfi: self.mfi[i],
            pct_b: self.pct_b[i],
            obv: self.obv[i],
        }
    }
}
