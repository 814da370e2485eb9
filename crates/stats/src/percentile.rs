//! Percentile by linear interpolation between order statistics.

/// Percentile `p` (0..=100) of `data` using the 1-indexed position
/// `1 + p (n - 1) / 100` and linear interpolation between the two bracketing
/// order statistics.
///
/// `data` need not be sorted. `p <= 0` returns the minimum and `p >= 100` the
/// maximum; a single value is returned as-is. Returns `None` for empty input.
pub fn percentile(data: &[f64], p: f64) -> Option<f64> {
    let n = data.len();
    if n == 0 {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    if n == 1 || p <= 0.0 {
        return Some(sorted[0]);
    }
    if p >= 100.0 {
        return Some(sorted[n - 1]);
    }

    let position = 1.0 + p * (n - 1) as f64 / 100.0;
    let lower = position.floor() as usize;
    let frac = position - lower as f64;
    if lower >= n {
        return Some(sorted[n - 1]);
    }
    // `lower` is 1-indexed: sorted[lower - 1] and sorted[lower] bracket it.
    Some(sorted[lower - 1] + frac * (sorted[lower] - sorted[lower - 1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn median_of_three() {
        assert_eq!(percentile(&[10.0, 20.0, 30.0], 50.0), Some(20.0));
    }

    #[test]
    fn ninetieth_of_three() {
        assert_relative_eq!(percentile(&[10.0, 20.0, 30.0], 90.0).unwrap(), 28.0, epsilon = 1e-12);
    }

    #[test]
    fn unsorted_input() {
        assert_relative_eq!(percentile(&[30.0, 10.0, 20.0], 90.0).unwrap(), 28.0, epsilon = 1e-12);
    }

    #[test]
    fn bounds_clamp_to_extremes() {
        let data = [4.0, 1.0, 9.0, 3.0];
        assert_eq!(percentile(&data, 0.0), Some(1.0));
        assert_eq!(percentile(&data, -5.0), Some(1.0));
        assert_eq!(percentile(&data, 100.0), Some(9.0));
        assert_eq!(percentile(&data, 250.0), Some(9.0));
    }

    #[test]
    fn empty_is_none() {
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn single_value() {
        assert_eq!(percentile(&[7.5], 5.0), Some(7.5));
        assert_eq!(percentile(&[7.5], 95.0), Some(7.5));
    }

    #[test]
    fn five_and_ninety_five() {
        // n=3: position(5) = 1.1, position(95) = 2.9
        let data = [10.0, 20.0, 30.0];
        assert_relative_eq!(percentile(&data, 5.0).unwrap(), 11.0, epsilon = 1e-12);
        assert_relative_eq!(percentile(&data, 95.0).unwrap(), 29.0, epsilon = 1e-12);
    }

    #[test]
    fn matches_even_sample_median() {
        assert_relative_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 50.0).unwrap(), 2.5, epsilon = 1e-12);
    }
}
