//! Client-side sensitivity analysis.
//!
//! Ranks interventions by the marginal probability gain of pushing each one
//! to its most favorable extreme, using the closed-form estimator instead of
//! simulation so the scan is cheap enough to rerun on every slider change.

mod sensitivity;

pub use sensitivity::*;
