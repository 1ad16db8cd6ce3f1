use crate::models::Candle;

/// Money flow index over the typical price `(high + low + close) / 3`.
///
/// Raw money flow `typical · volume` counts as positive when typical price
/// rose versus the previous bar and negative when it fell; unchanged bars
/// contribute to neither side. Defined from index `window`; a window with no
/// flow at all (all bars unchanged) stays NaN.
pub fn mfi(candles: &[Candle], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; candles.len()];
    if window == 0 || candles.len() <= window {
        return out;
    }

    let typical: Vec<f64> = candles
        .iter()
        .map(|c| (c.high + c.low + c.close) / 3.0)
        .collect();
    // signed flow per row, 0.0 on unchanged typical price
    let mut pos = vec![0.0; candles.len()];
    let mut neg = vec![0.0; candles.len()];
    for i in 1..candles.len() {
        let flow = typical[i] * candles[i].volume;
        if typical[i] > typical[i - 1] {
            pos[i] = flow;
        } else if typical[i] < typical[i - 1] {
            neg[i] = flow;
        }
    }

    let mut pos_sum: f64 = pos[1..=window].iter().sum();
    let mut neg_sum: f64 = neg[1..=window].iter().sum();
    out[window] = mfi_value(pos_sum, neg_sum);
    for i in (window + 1)..candles.len() {
        pos_sum += pos[i] - pos[i - window];
        neg_sum += neg[i] - neg[i - window];
        out[i] = mfi_value(pos_sum, neg_sum);
    }
    out
}

fn mfi_value(pos_sum: f64, neg_sum: f64) -> f64 {
    let total = pos_sum + neg_sum;
    if total == 0.0 {
        f64::NAN
    } else {
        100.0 * pos_sum / total
    }
}
