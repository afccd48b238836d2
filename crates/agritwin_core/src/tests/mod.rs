//! Integration tests for the projection model
//!
//! Tests are organized by topic:
//! - `estimate` - Closed-form probability estimator and its branches
//! - `interventions` - Catalog ordering, normalization, and inversion
//! - `params` - Parameter defaults and server update application
//! - `fallback` - Offline result synthesis
//! - `sensitivity` - Marginal-impact analysis

mod fallback;
mod sensitivity;
