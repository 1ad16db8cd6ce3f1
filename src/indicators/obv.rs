use crate::models::Candle;

/// On-balance volume. The first row starts the sum at `+volume[0]`; after
/// that volume is added on a close-up bar, subtracted on a close-down bar
/// and carried through unchanged on a flat close. Defined for every row.
pub fn obv(candles: &[Candle]) -> Vec<f64> {
    let mut out = Vec::with_capacity(candles.len());
    let mut running = 0.0;
    for (i, c) in candles.iter().enumerate() {
        if i == 0 || c.close > candles[i - 1].close {
            running += c.volume;
        } else if c.close < candles[i - 1].close {
            running -= c.volume;
        }
        out.push(running);
    }
    out
}
