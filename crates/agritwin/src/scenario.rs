//! Scenario files.
//!
//! A scenario is a YAML snapshot of the dashboard controls, so a run can be
//! reproduced headlessly:
//!
//! ```yaml
//! interventions:
//!   Mechanization: 90
//!   "Postharvest Loss (%)": 15
//! target_year: 2045
//! n_simulations: 5000
//! ```
//!
//! Interventions not listed keep their catalog defaults; unknown names are
//! ignored downstream like any other unknown slider.

use std::path::Path;

use serde::Deserialize;

use agritwin_core::model::RawSettings;

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario file: {0}")]
    Parse(#[from] serde_saphyr::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub interventions: RawSettings,
    pub target_year: Option<i32>,
    pub n_simulations: Option<u32>,
}

impl Scenario {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml(&content)?)
    }
}
