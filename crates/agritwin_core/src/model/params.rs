//! Stochastic growth model parameters.
//!
//! `ModelParams` is the single source of truth for the coefficients the
//! estimator shares with the projection server. It is built once with the
//! calibrated fallback constants and optionally overwritten field-by-field
//! from a `GET /api/model-params` response; a failed fetch leaves the
//! defaults in place, which are numerically consistent with the server's own
//! calibration.

use serde::{Deserialize, Serialize};

use crate::error::ModelParamsError;
use crate::model::interventions::INTERVENTION_COUNT;

/// Coefficients of the geometric growth process, index-aligned with the
/// intervention catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    /// Per-intervention drift contribution at full intensity.
    pub alpha: Vec<f64>,
    /// Per-intervention volatility reduction at full intensity.
    pub beta: Vec<f64>,
    /// Historical baseline annual growth rate.
    pub base_growth_rate: f64,
    /// Autonomous improvement drift independent of any intervention.
    pub baseline_alpha: f64,
    /// Annualized volatility with no risk-mitigating interventions.
    ///
    /// Must stay positive in the defaults; the estimator floors the computed
    /// volatility, not this raw field.
    pub base_volatility: f64,
    /// Agricultural PPP per capita in the base year.
    pub base_ag_ppp: f64,
    /// PPP level that counts as reaching the target.
    pub target_ag_ppp: f64,
    pub base_year: i32,
    pub target_year_default: i32,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            alpha: vec![
                0.011, 0.013, 0.016, 0.012, 0.015, 0.015, 0.015, 0.012, 0.013, 0.015, 0.014,
                0.014, 0.010, 0.013, 0.014, 0.011, 0.011, 0.014, 0.016, 0.015,
            ],
            beta: vec![
                0.006, 0.005, 0.007, 0.012, 0.005, 0.005, 0.007, 0.006, 0.005, 0.006, 0.007,
                0.007, 0.009, 0.011, 0.005, 0.005, 0.011, 0.007, 0.005, 0.013,
            ],
            base_growth_rate: 0.055,
            baseline_alpha: 0.0248,
            base_volatility: 0.02,
            base_ag_ppp: 803.0,
            target_ag_ppp: 7000.0,
            base_year: 2025,
            target_year_default: 2050,
        }
    }
}

impl ModelParams {
    /// Apply a server-side update in place.
    ///
    /// Present fields overwrite, absent fields are retained. Coefficient
    /// arrays must arrive as a pair with the expected length; a partial or
    /// misshapen coefficient update leaves `self` untouched.
    pub fn apply_update(&mut self, update: &ModelParamsUpdate) -> Result<(), ModelParamsError> {
        match (&update.alpha, &update.beta) {
            (Some(alpha), Some(beta)) => {
                check_len("alpha", alpha)?;
                check_len("beta", beta)?;
                self.alpha = alpha.clone();
                self.beta = beta.clone();
            }
            (Some(_), None) => {
                return Err(ModelParamsError::UnpairedCoefficients { present: "alpha" });
            }
            (None, Some(_)) => {
                return Err(ModelParamsError::UnpairedCoefficients { present: "beta" });
            }
            (None, None) => {}
        }

        if let Some(v) = update.base_growth_rate {
            self.base_growth_rate = v;
        }
        if let Some(v) = update.baseline_alpha {
            self.baseline_alpha = v;
        }
        if let Some(v) = update.base_volatility {
            self.base_volatility = v;
        }
        if let Some(v) = update.base_ag_ppp {
            self.base_ag_ppp = v;
        }
        if let Some(v) = update.target_ag_ppp {
            self.target_ag_ppp = v;
        }
        if let Some(v) = update.base_year {
            self.base_year = v;
        }
        if let Some(v) = update.target_year_default {
            self.target_year_default = v;
        }

        Ok(())
    }
}

fn check_len(field: &'static str, values: &[f64]) -> Result<(), ModelParamsError> {
    if values.len() == INTERVENTION_COUNT {
        Ok(())
    } else {
        Err(ModelParamsError::CoefficientLength {
            field,
            expected: INTERVENTION_COUNT,
            got: values.len(),
        })
    }
}

/// Wire shape of `GET /api/model-params`.
///
/// Every field is optional; the server sends whatever subset it has
/// recalibrated. `catalog_version`, when present, states which intervention
/// ordering the coefficients were calibrated against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelParamsUpdate {
    pub alpha: Option<Vec<f64>>,
    pub beta: Option<Vec<f64>>,
    pub base_growth_rate: Option<f64>,
    pub baseline_alpha: Option<f64>,
    pub base_volatility: Option<f64>,
    pub base_ag_ppp: Option<f64>,
    pub target_ag_ppp: Option<f64>,
    pub base_year: Option<i32>,
    #[serde(rename = "target_year")]
    pub target_year_default: Option<i32>,
    pub catalog_version: Option<u32>,
}
