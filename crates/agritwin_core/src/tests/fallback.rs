//! Tests for offline result synthesis

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::estimate::estimate_probability;
use crate::fallback::{MAX_DISTRIBUTION_POINTS, offline_results};
use crate::model::{InterventionCatalog, ModelParams, RawSettings};

fn zero_vector_settings(catalog: &InterventionCatalog) -> RawSettings {
    catalog
        .entries()
        .iter()
        .map(|e| (e.name.clone(), if e.inverted { 100.0 } else { 0.0 }))
        .collect()
}

#[test]
fn test_probability_matches_closed_form() {
    let catalog = InterventionCatalog::default();
    let params = ModelParams::default();
    let settings = zero_vector_settings(&catalog);
    let mut rng = StdRng::seed_from_u64(42);

    let results = offline_results(&settings, &catalog, &params, 2050, 2000, &mut rng).unwrap();
    let expected = estimate_probability(&settings, &catalog, &params, 2050).unwrap();

    assert_eq!(results.probability, expected);
}

#[test]
fn test_distribution_shape_and_truncation() {
    let catalog = InterventionCatalog::default();
    let params = ModelParams::default();
    let settings = zero_vector_settings(&catalog);
    let mut rng = StdRng::seed_from_u64(7);

    let small = offline_results(&settings, &catalog, &params, 2050, 100, &mut rng).unwrap();
    assert_eq!(small.distribution.len(), 100);

    let large = offline_results(&settings, &catalog, &params, 2050, 5000, &mut rng).unwrap();
    assert_eq!(large.distribution.len(), MAX_DISTRIBUTION_POINTS);
}

#[test]
fn test_quantiles_are_ordered() {
    let catalog = InterventionCatalog::default();
    let params = ModelParams::default();
    let settings = zero_vector_settings(&catalog);
    let mut rng = StdRng::seed_from_u64(11);

    let results = offline_results(&settings, &catalog, &params, 2050, 2000, &mut rng).unwrap();
    let q = results.quantiles;

    assert!(q.p5 <= q.p25);
    assert!(q.p25 <= q.p50);
    assert!(q.p50 <= q.p75);
    assert!(q.p75 <= q.p95);
    assert_eq!(results.median_ppp, q.p50);
}

#[test]
fn test_sample_mean_tracks_analytic_mean() {
    let catalog = InterventionCatalog::default();
    let params = ModelParams::default();
    let settings = zero_vector_settings(&catalog);
    let mut rng = StdRng::seed_from_u64(1234);

    let results = offline_results(&settings, &catalog, &params, 2050, 4000, &mut rng).unwrap();

    // E[S_T] = S_0 * exp(mu * T) for the log-normal terminal law
    let t = f64::from(params.target_year_default - params.base_year);
    let analytic = params.base_ag_ppp * (results.drift * t).exp();

    let relative = (results.mean_ppp - analytic).abs() / analytic;
    assert!(
        relative < 0.05,
        "sample mean {} too far from analytic {analytic}",
        results.mean_ppp
    );
}

#[test]
fn test_reported_moments_match_inputs() {
    let catalog = InterventionCatalog::default();
    let params = ModelParams::default();
    let settings = zero_vector_settings(&catalog);
    let mut rng = StdRng::seed_from_u64(3);

    let results = offline_results(&settings, &catalog, &params, 2050, 500, &mut rng).unwrap();

    assert!((results.drift - (params.base_growth_rate + params.baseline_alpha)).abs() < 1e-12);
    assert!((results.volatility - params.base_volatility).abs() < 1e-12);
    assert!(results.structural_index.is_none());
}
