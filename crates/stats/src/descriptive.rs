//! Mean, variance, standard deviation and skewness.

/// Arithmetic mean. Returns `None` if empty.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sample variance with N-1 denominator.
/// Returns `None` if fewer than 2 elements.
pub fn variance(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 2 {
        return None;
    }
    let m = mean(data)?;
    Some(data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / (n - 1) as f64)
}

/// Sample standard deviation with N-1 denominator.
/// Returns `None` if fewer than 2 elements.
pub fn sd(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// Adjusted Fisher-Pearson sample skewness, `n / ((n-1)(n-2)) Σ ((x - m) / s)^3`.
///
/// Returns `None` for fewer than 3 elements or zero variance.
pub fn skewness(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 3 {
        return None;
    }
    let m = mean(data)?;
    let s = sd(data)?;
    if s == 0.0 {
        return None;
    }
    let nf = n as f64;
    let cubed: f64 = data.iter().map(|&x| ((x - m) / s).powi(3)).sum();
    Some(nf / ((nf - 1.0) * (nf - 2.0)) * cubed)
}
