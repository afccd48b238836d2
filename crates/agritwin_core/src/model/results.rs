//! Projection result types shared with the server wire format.

use serde::{Deserialize, Serialize};

/// Distribution quantiles of the terminal PPP value.
///
/// The server always reports p5/p50/p95; p25 and p75 default to zero when a
/// trimmed payload omits them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantiles {
    pub p5: f64,
    #[serde(default)]
    pub p25: f64,
    pub p50: f64,
    #[serde(default)]
    pub p75: f64,
    pub p95: f64,
}

/// Outcome of one projection run, authoritative (server Monte Carlo) or
/// locally synthesized (log-normal fallback).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResults {
    /// Probability of the terminal value reaching the target.
    pub probability: f64,
    pub mean_ppp: f64,
    #[serde(default)]
    pub median_ppp: f64,
    #[serde(default)]
    pub std_ppp: f64,
    /// Terminal-value sample for the histogram, truncated server-side.
    pub distribution: Vec<f64>,
    pub quantiles: Quantiles,
    /// Annualized drift the run was executed with.
    #[serde(default)]
    pub drift: f64,
    /// Annualized volatility the run was executed with.
    #[serde(default)]
    pub volatility: f64,
    /// Opaque composite index some server builds attach; passed through for
    /// display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structural_index: Option<f64>,
}
