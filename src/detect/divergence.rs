use super::extrema::SwingPoint;
use crate::models::SignalKind;

pub const BULLISH_REASON: &str = "MACD Bullish Divergence";
pub const BEARISH_REASON: &str = "MACD Bearish Divergence";

/// The histogram swing closest to `target` by index distance. Ties go to
/// the earlier swing.
fn nearest(swings: &[SwingPoint], target: usize) -> SwingPoint {
    let mut best = swings[0];
    for s in &swings[1..] {
        if s.index.abs_diff(target) < best.index.abs_diff(target) {
            best = *s;
        }
    }
    best
}

/// Pairs the two most recent price swings with their nearest histogram
/// swings and checks the slopes for disagreement.
///
/// Bullish: price printed a lower low while the aligned histogram lows
/// rose. Bearish: price printed a higher high while the aligned histogram
/// highs fell. Bullish is checked first; when both patterns fire on the
/// same series the bearish result stands. At most one kind comes out of a
/// single classification.
pub fn classify(
    price_lows: &[SwingPoint],
    price_highs: &[SwingPoint],
    hist_lows: &[SwingPoint],
    hist_highs: &[SwingPoint],
) -> Option<(SignalKind, &'static str)> {
    let mut found = None;

    if price_lows.len() >= 2 && hist_lows.len() >= 2 {
        let p1 = price_lows[price_lows.len() - 2];
        let p2 = price_lows[price_lows.len() - 1];
        let h1 = nearest(hist_lows, p1.index);
        let h2 = nearest(hist_lows, p2.index);
        if p2.value < p1.value && h2.value > h1.value {
            found = Some((SignalKind::Bullish, BULLISH_REASON));
        }
    }

    if price_highs.len() >= 2 && hist_highs.len() >= 2 {
        let p1 = price_highs[price_highs.len() - 2];
        let p2 = price_highs[price_highs.len() - 1];
        let h1 = nearest(hist_highs, p1.index);
        let h2 = nearest(hist_highs, p2.index);
        if p2.value > p1.value && h2.value < h1.value {
            found = Some((SignalKind::Bearish, BEARISH_REASON));
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swings(points: &[(usize, f64)]) -> Vec<SwingPoint> {
        points
            .iter()
            .map(|&(index, value)| SwingPoint { index, value })
            .collect()
    }

    #[test]
    fn lower_low_with_rising_histogram_is_bullish() {
        let price_lows = swings(&[(10, 100.0), (20, 95.0)]);
        let hist_lows = swings(&[(10, -2.0), (20, -0.5)]);
        let got = classify(&price_lows, &[], &hist_lows, &[]);
        assert_eq!(got, Some((SignalKind::Bullish, BULLISH_REASON)));
    }

    #[test]
    fn falling_histogram_confirms_the_trend_and_stays_quiet() {
        let price_lows = swings(&[(10, 100.0), (20, 95.0)]);
        let hist_lows = swings(&[(10, -0.5), (20, -2.0)]);
        assert_eq!(classify(&price_lows, &[], &hist_lows, &[]), None);
    }

    #[test]
    fn higher_high_with_falling_histogram_is_bearish() {
        let price_highs = swings(&[(12, 105.0), (25, 110.0)]);
        let hist_highs = swings(&[(13, 3.0), (24, 1.2)]);
        let got = classify(&[], &price_highs, &[], &hist_highs);
        assert_eq!(got, Some((SignalKind::Bearish, BEARISH_REASON)));
    }

    #[test]
    fn bearish_wins_when_both_patterns_fire() {
        let price_lows = swings(&[(10, 100.0), (20, 95.0)]);
        let hist_lows = swings(&[(10, -2.0), (20, -0.5)]);
        let price_highs = swings(&[(14, 105.0), (24, 110.0)]);
        let hist_highs = swings(&[(14, 3.0), (24, 1.0)]);
        let got = classify(&price_lows, &price_highs, &hist_lows, &hist_highs);
        assert_eq!(got, Some((SignalKind::Bearish, BEARISH_REASON)));
    }

    #[test]
    fn equidistant_histogram_swings_pair_with_the_earlier_one() {
        // price low at 10 sits exactly between hist swings at 8 and 12;
        // only the earlier pairing (value -0.5 vs -1.0) reads as rising
        let price_lows = swings(&[(2, 50.0), (10, 45.0)]);
        let hist_lows = swings(&[(2, -1.0), (8, -0.5), (12, -3.0)]);
        let got = classify(&price_lows, &[], &hist_lows, &[]);
        assert_eq!(got, Some((SignalKind::Bullish, BULLISH_REASON)));
    }

    #[test]
    fn classification_is_idempotent() {
        let price_lows = swings(&[(10, 100.0), (20, 95.0)]);
        let hist_lows = swings(&[(11, -2.0), (19, -0.5)]);
        let first = classify(&price_lows, &[], &hist_lows, &[]);
        let second = classify(&price_lows, &[], &hist_lows, &[]);
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn one_swing_is_not_enough() {
        let price_lows = swings(&[(20, 95.0)]);
        let hist_lows = swings(&[(10, -2.0), (20, -0.5)]);
        assert_eq!(classify(&price_lows, &[], &hist_lows, &[]), None);
    }
}
