//! Model types: the intervention catalog, growth-model parameters, and
//! projection results.

pub mod interventions;
pub mod params;
pub mod results;

pub use interventions::{
    CATALOG_VERSION, Category, INTERVENTION_COUNT, Intervention, InterventionCatalog, RawSettings,
};
pub use params::{ModelParams, ModelParamsUpdate};
pub use results::{ProjectionResults, Quantiles};
