//! Locally synthesized projection results.
//!
//! When the projection endpoint is unreachable the dashboard still needs a
//! histogram and quantiles to render. Rather than duplicate the server's
//! year-by-year simulation, this module samples terminal values directly from
//! the log-normal law the estimator integrates, so the synthetic distribution
//! stays consistent with the closed-form probability shown next to it.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::EstimateError;
use crate::estimate::{self, DEGENERATE_SIGMA};
use crate::model::{InterventionCatalog, ModelParams, ProjectionResults, Quantiles, RawSettings};
use crate::stats::percentile;

/// Histogram payload cap, matching what the server sends to the front end.
pub const MAX_DISTRIBUTION_POINTS: usize = 1000;

/// Build a full `ProjectionResults` without touching the network.
///
/// The probability comes from the closed-form estimator; distribution
/// statistics come from `n_samples` draws of the terminal value. With
/// degenerate volatility the distribution collapses to the deterministic
/// point mass.
pub fn offline_results<R: Rng + ?Sized>(
    settings: &RawSettings,
    catalog: &InterventionCatalog,
    params: &ModelParams,
    target_year: i32,
    n_samples: usize,
    rng: &mut R,
) -> Result<ProjectionResults, EstimateError> {
    let vector = catalog.normalized_vector(settings);
    let (mu, sigma) = estimate::drift_and_volatility(&vector, params)?;
    let t = estimate::horizon_years(params, target_year);
    let probability = estimate::estimate_probability(settings, catalog, params, target_year)?;

    let n = n_samples.max(1);
    let mut samples = if sigma < DEGENERATE_SIGMA {
        vec![params.base_ag_ppp * (1.0 + mu).powi(t); n]
    } else {
        let t = f64::from(t);
        let mean_log = (mu - 0.5 * sigma * sigma) * t;
        let std_log = sigma * t.sqrt();
        let log_growth = Normal::new(mean_log, std_log).map_err(|_| {
            EstimateError::NonFinite {
                stage: "sampling distribution",
                value: std_log,
            }
        })?;

        (0..n)
            .map(|_| params.base_ag_ppp * log_growth.sample(rng).exp())
            .collect()
    };

    samples.sort_by(|a, b| a.total_cmp(b));

    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    let variance = samples
        .iter()
        .map(|s| (s - mean) * (s - mean))
        .sum::<f64>()
        / samples.len() as f64;
    let quantiles = Quantiles {
        p5: percentile(&samples, 5.0),
        p25: percentile(&samples, 25.0),
        p50: percentile(&samples, 50.0),
        p75: percentile(&samples, 75.0),
        p95: percentile(&samples, 95.0),
    };
    let median = quantiles.p50;

    samples.truncate(MAX_DISTRIBUTION_POINTS);

    Ok(ProjectionResults {
        probability,
        mean_ppp: mean,
        median_ppp: median,
        std_ppp: variance.sqrt(),
        distribution: samples,
        quantiles,
        drift: mu,
        volatility: sigma,
        structural_index: None,
    })
}
