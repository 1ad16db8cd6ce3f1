use super::{rolling_max, rolling_mean, rolling_min};

/// Wilder RSI. Defined from index `window` (one change per row is needed,
/// plus `window` changes for the seed averages); earlier rows are NaN.
///
/// The seed is the simple mean of the first `window` gains/losses, after
/// which Wilder smoothing `(prev·(w−1) + x) / w` takes over. A window with
/// no losses reads 100, matching the usual convention.
pub fn rsi(close: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; close.len()];
    if window == 0 || close.len() <= window {
        return out;
    }

    let w = window as f64;
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for i in 1..=window {
        let change = close[i] - close[i - 1];
        if change > 0.0 {
            gain_sum += change;
        } else {
            loss_sum -= change;
        }
    }
    let mut avg_gain = gain_sum / w;
    let mut avg_loss = loss_sum / w;
    out[window] = rsi_value(avg_gain, avg_loss);

    for i in (window + 1)..close.len() {
        let change = close[i] - close[i - 1];
        let (gain, loss) = if change > 0.0 {
            (change, 0.0)
        } else {
            (0.0, -change)
        };
        avg_gain = (avg_gain * (w - 1.0) + gain) / w;
        avg_loss = (avg_loss * (w - 1.0) + loss) / w;
        out[i] = rsi_value(avg_gain, avg_loss);
    }
    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

/// Stochastic RSI on a 0..=1 scale: the position of RSI inside its rolling
/// `window` range, smoothed with a `smooth`-row simple mean. Rows where the
/// RSI range is zero (flat market) stay NaN.
pub fn stoch_rsi(rsi: &[f64], window: usize, smooth: usize) -> Vec<f64> {
    let lo = rolling_min(rsi, window);
    let hi = rolling_max(rsi, window);
    let raw: Vec<f64> = (0..rsi.len())
        .map(|i| {
            let range = hi[i] - lo[i];
            if range == 0.0 {
                f64::NAN
            } else {
                (rsi[i] - lo[i]) / range
            }
        })
        .collect();
    rolling_mean(&raw, smooth)
}
