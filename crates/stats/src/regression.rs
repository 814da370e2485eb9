//! Ordinary least squares helpers.

/// Intercept and slope of a straight-line fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Value at `x = 0`.
    pub intercept: f64,
    /// Change in `y` per unit `x`.
    pub slope: f64,
}

impl LinearFit {
    /// Evaluates the line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fits `y = a + b x` by ordinary least squares with a two-column
/// (constant, `x`) design matrix, solving the 2x2 normal equations.
///
/// Returns `None` if the slices differ in length, there are fewer than two
/// points, any value is non-finite, or all `x` are equal.
pub fn linear_regression(x: &[f64], y: &[f64]) -> Option<LinearFit> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return None;
    }
    let n = x.len() as f64;
    let sx: f64 = x.iter().sum();
    let sy: f64 = y.iter().sum();
    let sxx: f64 = x.iter().map(|v| v * v).sum();
    let sxy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();

    let det = n * sxx - sx * sx;
    if det.abs() <= f64::EPSILON * n * sxx.max(1.0) {
        return None;
    }
    let slope = (n * sxy - sx * sy) / det;
    let intercept = (sy - slope * sx) / n;
    Some(LinearFit { intercept, slope })
}

/// Least-squares slope of `y = b x` (no intercept).
///
/// Returns `None` on length mismatch, empty input, non-finite values or
/// `Σ x² == 0`.
pub fn slope_through_origin(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.is_empty() {
        return None;
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return None;
    }
    let sxx: f64 = x.iter().map(|v| v * v).sum();
    if sxx == 0.0 {
        return None;
    }
    Some(x.iter().zip(y).map(|(a, b)| a * b).sum::<f64>() / sxx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn exact_line() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y: Vec<f64> = x.iter().map(|v| 0.5 + 2.0 * v).collect();
        let fit = linear_regression(&x, &y).unwrap();
        assert_relative_eq!(fit.intercept, 0.5, epsilon = 1e-12);
        assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.predict(10.0), 20.5, epsilon = 1e-12);
    }

    #[test]
    fn noisy_line() {
        // y = 1 + x with residuals (+1, -1, -1, +1) -> slope unchanged.
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [2.0, 1.0, 2.0, 5.0];
        let fit = linear_regression(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_inputs() {
        assert!(linear_regression(&[1.0], &[2.0]).is_none());
        assert!(linear_regression(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).is_none());
        assert!(linear_regression(&[1.0, 2.0], &[1.0]).is_none());
        assert!(linear_regression(&[1.0, f64::NAN], &[1.0, 2.0]).is_none());
    }

    #[test]
    fn origin_slope() {
        assert_relative_eq!(
            slope_through_origin(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap(),
            2.0,
            epsilon = 1e-12
        );
        assert!(slope_through_origin(&[0.0, 0.0], &[1.0, 2.0]).is_none());
    }
}
