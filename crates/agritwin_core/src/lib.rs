//! Policy-scenario growth projection library
//!
//! This crate provides the client-side model for an agricultural
//! policy-scenario dashboard backed by a remote Monte Carlo projection
//! service. It supports:
//! - A versioned catalog of 20 policy interventions with a canonical
//!   ordering shared with the server
//! - Growth-model parameters with calibrated fallback defaults and
//!   field-by-field server refresh
//! - A closed-form log-normal probability estimator for instant feedback
//!   between authoritative server results
//! - Offline synthesis of full projection results when the server is
//!   unreachable
//! - Closed-form sensitivity analysis ranking interventions by marginal
//!   probability impact

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod error;
pub mod estimate;
pub mod fallback;
pub mod stats;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use analysis::{SensitivityEntry, sensitivity_scan};
pub use error::{EstimateError, ModelParamsError};
pub use estimate::{
    DEGENERATE_SIGMA, VOLATILITY_FLOOR, drift_and_volatility, estimate_probability,
    terminal_probability,
};
pub use fallback::offline_results;
pub use model::{
    Category, INTERVENTION_COUNT, Intervention, InterventionCatalog, ModelParams,
    ModelParamsUpdate, ProjectionResults, Quantiles, RawSettings,
};
