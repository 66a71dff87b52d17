//! Percentiles with linear interpolation between order statistics.

/// The `p`-th percentile (`0 ≤ p ≤ 100`) of `samples`.
///
/// The rank `p/100 · (n − 1)` is interpolated between the order statistics on
/// either side of it, so `p = 0` is the minimum and `p = 100` the maximum.
/// Returns `None` for an empty sample.
pub fn percentile(samples: &[f64], p: f64) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let (a, b) = (sorted[lo], sorted[hi]);
    Some(a + (b - a) * (rank - lo as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_percentile() {
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn extremes_are_min_and_max() {
        let s = [3.0, 1.0, 4.0, 1.5, 9.0];
        assert_eq!(percentile(&s, 0.0), Some(1.0));
        assert_eq!(percentile(&s, 100.0), Some(9.0));
    }

    #[test]
    fn interpolates_linearly() {
        // numpy.percentile([1, 2, 3, 4], 20) == 1.6
        let p = percentile(&[4.0, 3.0, 2.0, 1.0], 20.0).unwrap();
        assert!((p - 1.6).abs() < 1e-12);
        assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0, 5.0], 50.0), Some(3.0));
        assert_eq!(percentile(&[10.0, 20.0], 25.0), Some(12.5));
    }

    #[test]
    fn single_sample_is_every_percentile() {
        assert_eq!(percentile(&[7.0], 0.0), Some(7.0));
        assert_eq!(percentile(&[7.0], 63.0), Some(7.0));
    }
}
