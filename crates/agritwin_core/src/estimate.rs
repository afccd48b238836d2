//! Closed-form probability estimator.
//!
//! The projection server simulates the growth process year by year; this
//! module integrates the same process in closed form so the dashboard can
//! repaint its probability gauge on every slider tick without a network
//! round-trip. The terminal value of a geometric process with constant drift
//! `mu` and volatility `sigma` over `t` years is log-normal:
//!
//! ```text
//! ln(S_t / S_0) ~ N((mu - sigma^2 / 2) t, sigma^2 t)
//! ```
//!
//! so the probability of reaching the target is `1 - Phi(z)` with `z` the
//! standardized log target ratio. The two models agree to within the error
//! function approximation plus Monte Carlo noise; the server result remains
//! authoritative and replaces the estimate when it arrives.

use crate::error::EstimateError;
use crate::model::{InterventionCatalog, ModelParams, RawSettings};
use crate::stats::normal_cdf;

/// Lower bound on annualized volatility.
///
/// Strong beta contributions could otherwise push volatility to zero or
/// below, degenerating the log-normal model.
pub const VOLATILITY_FLOOR: f64 = 0.004;

/// Below this volatility the process is treated as deterministic to avoid
/// dividing by a near-zero standard deviation.
pub const DEGENERATE_SIGMA: f64 = 1e-6;

/// Annualized drift and volatility implied by a normalized intervention
/// vector.
///
/// Volatility is already floored at [`VOLATILITY_FLOOR`]. Fails if the
/// vector and coefficient arrays disagree on length.
pub fn drift_and_volatility(
    vector: &[f64],
    params: &ModelParams,
) -> Result<(f64, f64), EstimateError> {
    if params.alpha.len() != vector.len() {
        return Err(EstimateError::CoefficientLength {
            expected: vector.len(),
            got: params.alpha.len(),
        });
    }
    if params.beta.len() != vector.len() {
        return Err(EstimateError::CoefficientLength {
            expected: vector.len(),
            got: params.beta.len(),
        });
    }

    let dot_alpha: f64 = vector
        .iter()
        .zip(&params.alpha)
        .map(|(v, a)| v * a)
        .sum();
    let dot_beta: f64 = vector.iter().zip(&params.beta).map(|(v, b)| v * b).sum();

    let mu = params.base_growth_rate + params.baseline_alpha + dot_alpha;
    let sigma = (params.base_volatility - dot_beta).max(VOLATILITY_FLOOR);

    Ok((
        ensure_finite(mu, "drift")?,
        ensure_finite(sigma, "volatility")?,
    ))
}

/// Projection horizon in years, clamped to at least one year.
#[must_use]
pub fn horizon_years(params: &ModelParams, target_year: i32) -> i32 {
    (target_year - params.base_year).max(1)
}

/// Probability that a geometric process with the given annualized moments,
/// starting at `base_ppp`, is at or above `target_ppp` after `years`.
///
/// With `sigma` below [`DEGENERATE_SIGMA`] the process is treated as
/// deterministic and the result is exactly `1.0` or `0.0`; otherwise the
/// log-normal terminal distribution is integrated in closed form.
pub fn terminal_probability(
    mu: f64,
    sigma: f64,
    years: i32,
    base_ppp: f64,
    target_ppp: f64,
) -> Result<f64, EstimateError> {
    if sigma < DEGENERATE_SIGMA {
        let deterministic = base_ppp * (1.0 + mu).powi(years);
        ensure_finite(deterministic, "deterministic terminal value")?;
        return Ok(if deterministic >= target_ppp { 1.0 } else { 0.0 });
    }

    let t = f64::from(years);
    let log_ratio = ensure_finite((target_ppp / base_ppp).ln(), "log target ratio")?;
    let mean = (mu - 0.5 * sigma * sigma) * t;
    let std = sigma * t.sqrt();
    let z = ensure_finite((log_ratio - mean) / std, "z-score")?;

    // clamp absorbs floating-point overshoot in the tails
    Ok((1.0 - normal_cdf(z)).clamp(0.0, 1.0))
}

/// Probability that the growth process starting at `base_ag_ppp` in
/// `base_year` reaches `target_ag_ppp` by `target_year`, in `[0, 1]`.
///
/// Pure computation over its arguments; callers that cannot use an estimate
/// (any non-finite intermediate) get an error and should keep whatever
/// probability they last displayed.
pub fn estimate_probability(
    settings: &RawSettings,
    catalog: &InterventionCatalog,
    params: &ModelParams,
    target_year: i32,
) -> Result<f64, EstimateError> {
    let vector = catalog.normalized_vector(settings);
    let (mu, sigma) = drift_and_volatility(&vector, params)?;
    let t = horizon_years(params, target_year);

    terminal_probability(mu, sigma, t, params.base_ag_ppp, params.target_ag_ppp)
}

#[inline]
fn ensure_finite(value: f64, stage: &'static str) -> Result<f64, EstimateError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EstimateError::NonFinite { stage, value })
    }
}
