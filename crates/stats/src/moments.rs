//! Probability-weighted moments and L-moments.

use crate::descriptive::mean;

/// Binomial coefficient `C(n, k)` as `f64`. Zero when `k > n`.
pub fn binomial(n: u32, k: u32) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * f64::from(n - i) / f64::from(i + 1))
}

/// Unbiased probability-weighted moment `b_l`.
///
/// `b_0` is the mean. For `l > 0`,
/// `b_l = (1/n) Σ_j x_(j) [(j-1)(j-2)…(j-l)] / [(n-1)(n-2)…(n-l)]`
/// over the ascending order statistics `x_(1) <= … <= x_(n)`.
///
/// Returns `None` if the sample is empty or `l >= n`.
pub fn probability_weighted_moment(data: &[f64], l: usize) -> Option<f64> {
    let n = data.len();
    if n == 0 || l >= n {
        return None;
    }
    if l == 0 {
        return mean(data);
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    let sum: f64 = sorted
        .iter()
        .enumerate()
        .skip(l)
        .map(|(idx, &x)| {
            let j = idx + 1;
            let weight = (1..=l).fold(1.0, |w, i| w * (j - i) as f64 / (n - i) as f64);
            weight * x
        })
        .sum();
    Some(sum / n as f64)
}

/// Sample L-moment `λ_k`.
///
/// `λ_1` is the mean; for `k >= 2`
/// `λ_k = Σ_{j=0}^{k-1} (-1)^{k-1-j} C(k-1, j) C(k-1+j, j) b_j`.
///
/// Returns `None` for `k == 0` or when any required `b_j` is undefined.
pub fn l_moment(data: &[f64], k: usize) -> Option<f64> {
    match k {
        0 => None,
        1 => mean(data),
        _ => {
            let r = (k - 1) as u32;
            let mut total = 0.0;
            for j in 0..k {
                let b = probability_weighted_moment(data, j)?;
                let sign = if (k - 1 - j) % 2 == 0 { 1.0 } else { -1.0 };
                let j32 = j as u32;
                total += sign * binomial(r, j32) * binomial(r + j32, j32) * b;
            }
            Some(total)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn binomial_values() {
        assert_eq!(binomial(4, 2), 6.0);
        assert_eq!(binomial(5, 0), 1.0);
        assert_eq!(binomial(5, 5), 1.0);
        assert_eq!(binomial(10, 3), 120.0);
        assert_eq!(binomial(2, 3), 0.0);
    }

    #[test]
    fn pwm_zero_is_mean() {
        assert_relative_eq!(
            probability_weighted_moment(&[1.0, 2.0, 6.0], 0).unwrap(),
            3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn pwm_one_hand_computed() {
        // sorted [1,2,3,4], n=4: b1 = (1/4) Σ x_j (j-1)/3 = (0 + 2/3 + 6/3 + 12/3) / 4
        let b1 = probability_weighted_moment(&[4.0, 1.0, 3.0, 2.0], 1).unwrap();
        assert_relative_eq!(b1, (20.0 / 3.0) / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn pwm_undefined_order() {
        assert!(probability_weighted_moment(&[1.0, 2.0], 2).is_none());
        assert!(probability_weighted_moment(&[], 0).is_none());
    }

    #[test]
    fn l_moments_of_uniform_grid() {
        // For 1..=n, λ2 = (n+1)/6 and λ3 = 0.
        let data: Vec<f64> = (1..=11).map(f64::from).collect();
        assert_relative_eq!(l_moment(&data, 1).unwrap(), 6.0, epsilon = 1e-12);
        assert_relative_eq!(l_moment(&data, 2).unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(l_moment(&data, 3).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn l_moment_two_is_half_mean_difference() {
        // λ2 equals half the mean absolute pairwise difference.
        let data: [f64; 5] = [3.0, 7.0, 1.0, 12.0, 5.0];
        let n = data.len() as f64;
        let mut gini = 0.0;
        for a in &data {
            for b in &data {
                gini += (a - b).abs();
            }
        }
        let expected = gini / (n * (n - 1.0)) / 2.0;
        assert_relative_eq!(l_moment(&data, 2).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn l_moment_propagates_missing() {
        assert!(l_moment(&[1.0, 2.0], 3).is_none());
        assert!(l_moment(&[1.0, 2.0], 0).is_none());
    }
}
