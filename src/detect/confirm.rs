use crate::indicators::IndicatorSeries;

/// Points granted by the divergence itself before any confirmation.
pub const BASE_STRENGTH: u32 = 3;
/// Upper bound on strength: the base plus one point per supporting check.
/// The oversold/overbought pairs are mutually exclusive on a single row, so
/// in practice at most four of the eight checks can land.
pub const MAX_STRENGTH: u32 = 8;
/// How many rows back the OBV trend comparison reaches.
pub const OBV_LOOKBACK: usize = 10;

/// Scores the latest row against the supporting-indicator checklist.
///
/// Each threshold hit adds one point and appends its reason; the OBV trend
/// check appends a reason without scoring. Reasons land in checklist order
/// after whatever the caller already collected.
pub fn score(series: &IndicatorSeries, reasons: &mut Vec<String>) -> u32 {
    let v = series.latest();
    let mut strength = BASE_STRENGTH;

    let checks: [(bool, &str); 8] = [
        (v.rsi < 35.0, "RSI Oversold"),
        (v.rsi > 65.0, "RSI Overbought"),
        (v.stoch_rsi < 0.2, "StochRSI Oversold"),
        (v.stoch_rsi > 0.8, "StochRSI Overbought"),
        (v.mfi < 30.0, "MFI Oversold"),
        (v.mfi > 70.0, "MFI Overbought"),
        (v.pct_b < 0.2, "BB %B Oversold"),
        (v.pct_b > 0.8, "BB %B Overbought"),
    ];
    for (hit, reason) in checks {
        if hit {
            strength += 1;
            reasons.push(reason.to_string());
        }
    }

    let last = series.len() - 1;
    if last >= OBV_LOOKBACK && series.obv[last] > series.obv[last - OBV_LOOKBACK] {
        reasons.push("OBV Rising".to_string());
    }

    strength
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A series with enough rows for the OBV lookback where only the last
    /// row's values matter.
    fn series_with_latest(
        rsi: f64,
        stoch_rsi: f64,
        mfi: f64,
        pct_b: f64,
        obv_rising: bool,
    ) -> IndicatorSeries {
        let mut s = IndicatorSeries::default();
        let rows = OBV_LOOKBACK + 2;
        for i in 0..rows {
            s.ts.push(60_000 * i as i64);
            s.close.push(100.0);
            s.low.push(99.0);
            s.macd.push(0.1);
            s.signal.push(0.1);
            s.hist.push(0.0);
            s.rsi.push(50.0);
            s.stoch_rsi.push(0.5);
            s.mfi.push(50.0);
            s.obv.push(if obv_rising { i as f64 } else { -(i as f64) });
            s.pct_b.push(0.5);
        }
        let last = rows - 1;
        s.rsi[last] = rsi;
        s.stoch_rsi[last] = stoch_rsi;
        s.mfi[last] = mfi;
        s.pct_b[last] = pct_b;
        s
    }

    #[test]
    fn all_oversold_with_rising_obv() {
        let s = series_with_latest(30.0, 0.1, 25.0, 0.15, true);
        let mut reasons = vec!["MACD Bullish Divergence".to_string()];
        let strength = score(&s, &mut reasons);
        assert_eq!(strength, 7);
        assert_eq!(
            reasons,
            vec![
                "MACD Bullish Divergence",
                "RSI Oversold",
                "StochRSI Oversold",
                "MFI Oversold",
                "BB %B Oversold",
                "OBV Rising",
            ]
        );
    }

    #[test]
    fn neutral_row_keeps_the_base() {
        let s = series_with_latest(50.0, 0.5, 50.0, 0.5, false);
        let mut reasons = Vec::new();
        assert_eq!(score(&s, &mut reasons), BASE_STRENGTH);
        assert!(reasons.is_empty());
    }

    #[test]
    fn thresholds_are_strict() {
        // exactly on a boundary never scores
        let s = series_with_latest(35.0, 0.2, 30.0, 0.2, false);
        let mut reasons = Vec::new();
        assert_eq!(score(&s, &mut reasons), BASE_STRENGTH);
    }

    #[test]
    fn obv_contributes_no_point() {
        let quiet = series_with_latest(50.0, 0.5, 50.0, 0.5, false);
        let rising = series_with_latest(50.0, 0.5, 50.0, 0.5, true);
        let mut a = Vec::new();
        let mut b = Vec::new();
        assert_eq!(score(&quiet, &mut a), score(&rising, &mut b));
        assert!(a.is_empty());
        assert_eq!(b, vec!["OBV Rising"]);
    }

    #[test]
    fn strength_never_exceeds_the_cap() {
        // overbought on every oscillator, the worst case a row can reach
        let s = series_with_latest(80.0, 0.95, 90.0, 0.99, true);
        let mut reasons = Vec::new();
        assert!(score(&s, &mut reasons) <= MAX_STRENGTH);
    }
}
