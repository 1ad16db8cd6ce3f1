use super::{rolling_mean, rolling_std_pop};

/// Bollinger %B: where the close sits inside bands placed `num_std`
/// population standard deviations around a `window` simple mean. 0 is the
/// lower band, 1 the upper; values outside 0..=1 mean the close escaped the
/// bands. NaN during warm-up and when the band width is zero.
pub fn percent_b(close: &[f64], window: usize, num_std: f64) -> Vec<f64> {
    let mid = rolling_mean(close, window);
    let sd = rolling_std_pop(close, window);
    (0..close.len())
        .map(|i| {
            let lower = mid[i] - num_std * sd[i];
            let width = 2.0 * num_std * sd[i];
            if width == 0.0 {
                f64::NAN
            } else {
                (close[i] - lower) / width
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn warm_up_then_defined() {
        let close = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let out = percent_b(&close, 5, 2.0);
        assert!(out[..4].iter().all(|v| v.is_nan()));
        assert!(out[4].is_finite());
        assert!(out[5].is_finite());
    }

    #[test]
    fn close_at_mean_is_half_band() {
        // symmetric window around the last close puts it exactly mid-band
        let out = percent_b(&[2.0, 1.0, 3.0, 1.0, 3.0, 2.0], 5, 2.0);
        assert_relative_eq!(out[5], 0.5);
    }

    #[test]
    fn top_of_range_sits_above_half() {
        let out = percent_b(&[1.0, 2.0, 3.0, 4.0, 5.0], 5, 2.0);
        assert!(out[4] > 0.5);
        assert!(out[4] < 1.0);
    }

    #[test]
    fn flat_window_is_nan() {
        let out = percent_b(&[7.0; 10], 5, 2.0);
        assert!(out.iter().all(|v| v.is_nan()));
    }
}
