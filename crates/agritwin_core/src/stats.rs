//! Scalar numerical primitives shared by the estimator and fallback sampler.

use std::f64::consts::SQRT_2;

// Abramowitz & Stegun 7.1.26 rational approximation coefficients.
const A1: f64 = 0.254829592;
const A2: f64 = -0.284496736;
const A3: f64 = 1.421413741;
const A4: f64 = -1.453152027;
const A5: f64 = 1.061405429;
const P: f64 = 0.3275911;

/// Error function via the Abramowitz & Stegun rational approximation.
///
/// Maximum absolute error is about 1.5e-7, which keeps the closed-form
/// probability within Monte Carlo noise of the server's simulated value while
/// staying cheap enough to run on every slider tick.
#[must_use]
#[inline]
pub fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;

    sign * (1.0 - poly * (-x * x).exp())
}

/// Standard normal cumulative distribution function.
#[must_use]
#[inline]
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / SQRT_2))
}

/// Linear-interpolation percentile of an ascending-sorted sample.
///
/// `p` is in percent (0..=100). Matches the conventional "linear" method so
/// locally generated quantiles line up with the server's reported ones.
#[must_use]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }

    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erf_reference_values() {
        // The approximation's coefficients sum to 1 - 1e-9, so erf(0) is a
        // hair above zero rather than exact
        assert!(erf(0.0).abs() < 1e-6);
        assert!((erf(1.0) - 0.842_700_792_9).abs() < 1e-6);
        assert!((erf(2.0) - 0.995_322_265_0).abs() < 1e-6);
    }

    #[test]
    fn test_erf_odd_symmetry() {
        for x in [0.1, 0.5, 1.0, 2.5] {
            assert!((erf(-x) + erf(x)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_erf_saturates_exactly() {
        // exp(-x^2) underflows well before x = 30, so the tails are exact
        assert_eq!(erf(30.0), 1.0);
        assert_eq!(erf(-30.0), -1.0);
    }

    #[test]
    fn test_normal_cdf_midpoint_and_tails() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-6);
        assert_eq!(normal_cdf(40.0), 1.0);
        assert_eq!(normal_cdf(-40.0), 0.0);
        assert!((normal_cdf(1.96) - 0.975).abs() < 1e-3);
    }

    #[test]
    fn test_percentile_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 50.0), 3.0);
        assert_eq!(percentile(&sorted, 100.0), 5.0);
        assert!((percentile(&sorted, 25.0) - 2.0).abs() < 1e-12);
        assert!((percentile(&sorted, 10.0) - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_degenerate_inputs() {
        assert!(percentile(&[], 50.0).is_nan());
        assert_eq!(percentile(&[7.0], 95.0), 7.0);
    }
}
