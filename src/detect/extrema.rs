/// A strict local extremum of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingPoint {
    pub index: usize,
    pub value: f64,
}

/// Finds swing lows and highs: rows strictly below (above) every one of the
/// `window` neighbors on each side. Rows closer than `window` to either edge
/// are never eligible, and a tie with any neighbor disqualifies the row.
/// Returned points are ordered by index.
pub fn find_extrema(series: &[f64], window: usize) -> (Vec<SwingPoint>, Vec<SwingPoint>) {
    let mut lows = Vec::new();
    let mut highs = Vec::new();
    if window == 0 || series.len() < 2 * window + 1 {
        return (lows, highs);
    }

    for i in window..(series.len() - window) {
        let v = series[i];
        let mut is_low = true;
        let mut is_high = true;
        for j in 1..=window {
            if v >= series[i - j] || v >= series[i + j] {
                is_low = false;
            }
            if v <= series[i - j] || v <= series[i + j] {
                is_high = false;
            }
            if !is_low && !is_high {
                break;
            }
        }
        if is_low {
            lows.push(SwingPoint { index: i, value: v });
        }
        if is_high {
            highs.push(SwingPoint { index: i, value: v });
        }
    }
    (lows, highs)
}
