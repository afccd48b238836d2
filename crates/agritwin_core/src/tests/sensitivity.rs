//! Tests for the marginal-impact sensitivity scan

use crate::analysis::sensitivity_scan;
use crate::estimate::estimate_probability;
use crate::model::{InterventionCatalog, ModelParams, RawSettings};

const POSTHARVEST: &str = "Postharvest Loss (%)";

fn zero_vector_settings(catalog: &InterventionCatalog) -> RawSettings {
    catalog
        .entries()
        .iter()
        .map(|e| (e.name.clone(), if e.inverted { 100.0 } else { 0.0 }))
        .collect()
}

#[test]
fn test_scan_covers_catalog_and_sorts_descending() {
    let catalog = InterventionCatalog::default();
    let params = ModelParams::default();
    let settings = zero_vector_settings(&catalog);

    let entries = sensitivity_scan(&settings, &catalog, &params, 2050).unwrap();

    assert_eq!(entries.len(), catalog.len());
    for pair in entries.windows(2) {
        assert!(pair[0].marginal_impact >= pair[1].marginal_impact);
    }
}

#[test]
fn test_impacts_non_negative_from_zero_baseline() {
    let catalog = InterventionCatalog::default();
    let params = ModelParams::default();
    let settings = zero_vector_settings(&catalog);

    let baseline = estimate_probability(&settings, &catalog, &params, 2050).unwrap();

    for entry in sensitivity_scan(&settings, &catalog, &params, 2050).unwrap() {
        assert_eq!(entry.baseline_probability, baseline);
        assert!(
            entry.marginal_impact >= 0.0,
            "{} lost probability: {}",
            entry.name,
            entry.marginal_impact
        );
    }
}

#[test]
fn test_inverted_lever_tested_toward_zero_loss() {
    let catalog = InterventionCatalog::default();
    let params = ModelParams::default();

    // Baseline with maximal postharvest loss; its favorable extreme is raw 0
    let mut settings = zero_vector_settings(&catalog);
    settings.insert(POSTHARVEST.to_string(), 100.0);

    let entries = sensitivity_scan(&settings, &catalog, &params, 2050).unwrap();
    let postharvest = entries.iter().find(|e| e.name == POSTHARVEST).unwrap();

    assert!(postharvest.test_probability >= postharvest.baseline_probability);
    assert!(postharvest.marginal_impact > 0.0);
}

#[test]
fn test_cost_effectiveness_scaling() {
    let catalog = InterventionCatalog::default();
    let params = ModelParams::default();
    let settings = zero_vector_settings(&catalog);

    for entry in sensitivity_scan(&settings, &catalog, &params, 2050).unwrap() {
        let expected = entry.marginal_impact / entry.cost;
        assert!((entry.cost_effectiveness - expected).abs() < 1e-12);
    }
}
