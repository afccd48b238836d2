use serde::Serialize;

use crate::error::EstimateError;
use crate::estimate::estimate_probability;
use crate::model::{Category, InterventionCatalog, ModelParams, RawSettings};

/// Marginal impact of maxing out one intervention from the given baseline.
#[derive(Debug, Clone, Serialize)]
pub struct SensitivityEntry {
    pub name: String,
    pub category: Category,
    pub baseline_probability: f64,
    pub test_probability: f64,
    pub marginal_impact: f64,
    pub cost: f64,
    /// Marginal impact per unit of cost; zero when the lever is free.
    pub cost_effectiveness: f64,
}

/// Scan every intervention's marginal impact, sorted best-first.
///
/// Each lever is moved to its most favorable extreme while the others stay
/// at the baseline: raw 100 normally, raw 0 for inverted levers where a low
/// slider is the good outcome.
pub fn sensitivity_scan(
    settings: &RawSettings,
    catalog: &InterventionCatalog,
    params: &ModelParams,
    target_year: i32,
) -> Result<Vec<SensitivityEntry>, EstimateError> {
    let baseline_probability = estimate_probability(settings, catalog, params, target_year)?;

    let mut entries = Vec::with_capacity(catalog.len());
    for intervention in catalog.entries() {
        let favorable = if intervention.inverted { 0.0 } else { 100.0 };

        let mut test_settings = settings.clone();
        test_settings.insert(intervention.name.clone(), favorable);
        let test_probability =
            estimate_probability(&test_settings, catalog, params, target_year)?;

        let marginal_impact = test_probability - baseline_probability;
        entries.push(SensitivityEntry {
            name: intervention.name.clone(),
            category: intervention.category,
            baseline_probability,
            test_probability,
            marginal_impact,
            cost: intervention.cost,
            cost_effectiveness: if intervention.cost > 0.0 {
                marginal_impact / intervention.cost
            } else {
                0.0
            },
        });
    }

    entries.sort_by(|a, b| b.marginal_impact.total_cmp(&a.marginal_impact));
    Ok(entries)
}
