//! Return-period transforms shared by the parametric fits.

/// Return period used in place of `T <= 1`, where `ln(-ln(1 - 1/T))` diverges.
pub const UNIT_RETURN_PERIOD_SUBSTITUTE: f64 = 1.01;

/// Returns `t`, or [`UNIT_RETURN_PERIOD_SUBSTITUTE`] when `t <= 1`.
pub fn effective_return_period(t: f64) -> f64 {
    if t <= 1.0 {
        UNIT_RETURN_PERIOD_SUBSTITUTE
    } else {
        t
    }
}

/// Gumbel reduced variate `y_T = -ln(-ln(1 - 1/T))` of return period `t`
/// (after the `T = 1` substitution).
pub fn reduced_variate(t: f64) -> f64 {
    let t = effective_return_period(t);
    -(-(1.0 - 1.0 / t).ln()).ln()
}
