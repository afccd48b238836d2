//! Headless client for the agricultural policy-scenario dashboard
//!
//! This crate wires the closed-form projection model from `agritwin_core`
//! to the remote Monte Carlo projection service. It supports:
//! - Instant local probability estimates on every control change
//! - Debounced, sequence-guarded remote projection calls on a background
//!   thread
//! - Parameter synchronization from the server with calibrated fallback
//!   defaults
//! - Locally synthesized results when the service is unreachable
//! - Reproducible scenario files in YAML

// ============================================================================
// Core modules
// ============================================================================

pub mod api;
pub mod logging;
pub mod scenario;
pub mod session;
pub mod worker;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use api::{ApiClient, ApiError, ProjectionBackend, ProjectionRequest};
pub use logging::init_logging;
pub use scenario::{Scenario, ScenarioError};
pub use session::{DashboardSession, ProbabilityReading, ReadingSource};
pub use worker::{DEBOUNCE_WINDOW, ProjectionOutcome, ProjectionWorker};
