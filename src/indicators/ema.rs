/// SMA-seeded exponential moving average over a candle-aligned series.
///
/// Output is the same length as the input. The first defined value sits at
/// the index of the `window`-th finite input and equals the simple mean of
/// the first `window` finite values; after that the recursive form
/// `α·x + (1−α)·prev` with `α = 2/(window+1)` applies. Everything before the
/// seed is NaN, and leading NaNs in the input (e.g. a MACD line fed back in
/// for the signal EMA) push the seed back accordingly.
pub fn ema(values: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if window == 0 {
        return out;
    }

    let start = match values.iter().position(|v| v.is_finite()) {
        Some(i) => i,
        None => return out,
    };
    if values.len() - start < window {
        return out;
    }

    let seed_at = start + window - 1;
    let seed: f64 = values[start..=seed_at].iter().sum::<f64>() / window as f64;
    out[seed_at] = seed;

    let alpha = 2.0 / (window as f64 + 1.0);
    let mut prev = seed;
    for i in (seed_at + 1)..values.len() {
        prev = alpha * values[i] + (1.0 - alpha) * prev;
        out[i] = prev;
    }
    out
}
