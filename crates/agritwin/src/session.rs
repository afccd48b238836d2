//! Dashboard session state.
//!
//! One `DashboardSession` lives for the whole page/CLI lifetime. Slider
//! changes update it synchronously and get an instant closed-form estimate
//! back; the debounced remote projection lands later and replaces the
//! estimate with the authoritative value. Every change that invalidates the
//! remote result bumps a monotonically increasing sequence number, and
//! remote results are dropped unless they are at least as new as the state
//! they would overwrite.

use tracing::{debug, info, warn};

use agritwin_core::error::ModelParamsError;
use agritwin_core::estimate::estimate_probability;
use agritwin_core::model::{
    InterventionCatalog, ModelParams, ModelParamsUpdate, ProjectionResults, RawSettings,
};

use crate::api::ProjectionRequest;

/// Simulation count sent to the server when the scenario does not override it.
pub const DEFAULT_SIMULATIONS: u32 = 2000;

/// Where the currently displayed probability came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingSource {
    /// Instant closed-form estimate, shown while the remote call is in flight.
    Estimate,
    /// Authoritative server Monte Carlo result.
    Final,
}

/// The probability currently shown on the gauge.
#[derive(Debug, Clone, Copy)]
pub struct ProbabilityReading {
    pub value: f64,
    pub source: ReadingSource,
    /// Sequence number of the state this reading was computed from.
    pub seq: u64,
}

pub struct DashboardSession {
    params: ModelParams,
    catalog: InterventionCatalog,
    settings: RawSettings,
    target_year: i32,
    n_simulations: u32,
    reading: Option<ProbabilityReading>,
    /// Last issued sequence number; bumped by every state change.
    next_seq: u64,
    /// Highest sequence number whose remote result has been applied.
    remote_seq: u64,
}

impl DashboardSession {
    #[must_use]
    pub fn new(params: ModelParams, catalog: InterventionCatalog) -> Self {
        let settings = catalog.default_settings();
        let target_year = params.target_year_default;
        let mut session = Self {
            params,
            catalog,
            settings,
            target_year,
            n_simulations: DEFAULT_SIMULATIONS,
            reading: None,
            next_seq: 0,
            remote_seq: 0,
        };
        session.refresh_estimate();
        session
    }

    /// Set a slider and recompute the local estimate.
    ///
    /// Returns the sequence number to attach to the follow-up remote call,
    /// or `None` when the name is not in the catalog (the change is ignored
    /// entirely, matching the tolerant name lookup everywhere else).
    pub fn set_intervention(&mut self, name: &str, raw: f64) -> Option<u64> {
        if self.catalog.index_of(name).is_none() {
            debug!("ignoring unknown intervention '{name}'");
            return None;
        }
        self.settings.insert(name.to_string(), raw);
        Some(self.bump_and_estimate())
    }

    pub fn set_target_year(&mut self, year: i32) -> u64 {
        self.target_year = year;
        self.bump_and_estimate()
    }

    pub fn set_n_simulations(&mut self, n: u32) -> u64 {
        self.n_simulations = n;
        // The local estimate does not depend on the simulation count, but
        // the pending remote request does.
        self.next_seq += 1;
        self.next_seq
    }

    /// Apply a fetched parameter update.
    ///
    /// On any error the previous parameters stay in effect; the built-in
    /// defaults are calibrated to match the server, so a failed sync is a
    /// degradation, not an outage.
    pub fn sync_params(&mut self, update: &ModelParamsUpdate) -> Result<(), ModelParamsError> {
        if let Some(got) = update.catalog_version {
            let expected = self.catalog.version();
            if got != expected {
                return Err(ModelParamsError::CatalogVersion { expected, got });
            }
        }
        self.params.apply_update(update)?;
        info!("model parameters synchronized from server");
        self.bump_and_estimate();
        Ok(())
    }

    /// The request the worker should send for the current state.
    #[must_use]
    pub fn projection_request(&self) -> ProjectionRequest {
        ProjectionRequest {
            interventions: self.settings.clone(),
            n_simulations: self.n_simulations,
            year: self.target_year,
        }
    }

    /// Issue a fresh sequence number with the request for the current state.
    ///
    /// For callers that want to trigger a remote projection without going
    /// through a control change.
    pub fn next_request(&mut self) -> (u64, ProjectionRequest) {
        self.next_seq += 1;
        (self.next_seq, self.projection_request())
    }

    /// Apply an authoritative remote result.
    ///
    /// Returns `false` when the result is stale: either a remote result for
    /// a newer sequence number was already applied, or the sliders have
    /// moved since this request was issued and a newer local estimate is on
    /// screen. Out-of-order completions therefore never roll the gauge back.
    pub fn apply_remote(&mut self, seq: u64, results: &ProjectionResults) -> bool {
        // Sequence numbers start at 1, so the zero-initialized high-water
        // marks never block the first result.
        let newest_shown = self.reading.map(|r| r.seq).unwrap_or(0);
        if seq <= self.remote_seq || seq < newest_shown {
            debug!(
                seq,
                remote_seq = self.remote_seq,
                newest_shown,
                "discarding stale remote projection result"
            );
            return false;
        }
        self.remote_seq = seq;
        self.reading = Some(ProbabilityReading {
            value: results.probability,
            source: ReadingSource::Final,
            seq,
        });
        true
    }

    #[must_use]
    pub fn reading(&self) -> Option<ProbabilityReading> {
        self.reading
    }

    #[must_use]
    pub fn settings(&self) -> &RawSettings {
        &self.settings
    }

    #[must_use]
    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    #[must_use]
    pub fn catalog(&self) -> &InterventionCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn target_year(&self) -> i32 {
        self.target_year
    }

    #[must_use]
    pub fn n_simulations(&self) -> u32 {
        self.n_simulations
    }

    fn bump_and_estimate(&mut self) -> u64 {
        self.next_seq += 1;
        self.refresh_estimate();
        self.next_seq
    }

    /// Recompute the closed-form estimate for the current state.
    ///
    /// A failed estimate keeps the previous reading on screen; there is
    /// nothing useful to paint from a non-finite intermediate.
    fn refresh_estimate(&mut self) {
        match estimate_probability(
            &self.settings,
            &self.catalog,
            &self.params,
            self.target_year,
        ) {
            Ok(value) => {
                self.reading = Some(ProbabilityReading {
                    value,
                    source: ReadingSource::Estimate,
                    seq: self.next_seq,
                });
            }
            Err(e) => {
                warn!("probability estimate unavailable: {e}");
            }
        }
    }
}
