use super::ema::ema;

/// MACD line, signal line and histogram, all candle-aligned.
#[derive(Debug, Clone)]
pub struct MacdOutput {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub hist: Vec<f64>,
}

/// Classic MACD: `macd = EMA(fast) − EMA(slow)`, `signal = EMA(signal)` of
/// the MACD line, `hist = macd − signal`.
///
/// With SMA-seeded EMAs the MACD line is defined from index `slow − 1` and
/// the signal (and histogram) from index `slow + signal_window − 2`; earlier
/// rows are NaN.
pub fn macd(close: &[f64], fast: usize, slow: usize, signal_window: usize) -> MacdOutput {
    let fast_ema = ema(close, fast);
    let slow_ema = ema(close, slow);

    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal = ema(&line, signal_window);
    let hist: Vec<f64> = line.iter().zip(&signal).map(|(m, s)| m - s).collect();

    MacdOutput {
        macd: line,
        signal,
        hist,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn warm_up_boundaries() {
        let close: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64) * 0.3).collect();
        let out = macd(&close, 12, 26, 9);
        assert!(out.macd[24].is_nan());
        assert!(out.macd[25].is_finite());
        assert!(out.signal[32].is_nan());
        assert!(out.signal[33].is_finite());
        assert!(out.hist[32].is_nan());
        assert!(out.hist[33].is_finite());
    }

    #[test]
    fn small_case_by_hand() {
        // fast 1 copies the input, slow 2 seeds at index 1, signal 2 at index 2.
        let out = macd(&[1.0, 2.0, 3.0, 4.0], 1, 2, 2);
        assert!(out.macd[0].is_nan());
        assert_relative_eq!(out.macd[1], 0.5);
        assert_relative_eq!(out.macd[2], 0.5);
        assert_relative_eq!(out.macd[3], 0.5);
        assert_relative_eq!(out.signal[2], 0.5);
        assert_relative_eq!(out.hist[2], 0.0);
        assert_relative_eq!(out.hist[3], 0.0);
    }

    #[test]
    fn flat_close_gives_zero_histogram() {
        let close = vec![50.0; 80];
        let out = macd(&close, 12, 26, 9);
        assert_relative_eq!(out.hist[79], 0.0);
    }
}
