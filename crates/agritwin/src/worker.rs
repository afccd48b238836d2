//! Background worker for the authoritative projection call.
//!
//! Remote projections run on a dedicated thread so slider handling never
//! blocks on the network. Requests are debounced: rapid slider movement
//! collapses to at most one network call per quiescent window, and only the
//! newest request survives (last-write-wins; superseded requests never reach
//! the wire). When the service fails, the worker synthesizes results locally
//! so the charts keep rendering.

use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{info, warn};

use agritwin_core::fallback::offline_results;
use agritwin_core::model::{InterventionCatalog, ModelParams, ProjectionResults};

use crate::api::{ProjectionBackend, ProjectionRequest};

/// Quiescent period before a pending request is sent.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(800);

/// Request sent to the background worker
#[derive(Debug)]
pub enum ProjectionJob {
    /// Run (or supersede the pending) projection
    Run {
        seq: u64,
        request: ProjectionRequest,
    },
    /// Graceful shutdown
    Shutdown,
}

/// Response from the background worker
#[derive(Debug)]
pub enum ProjectionOutcome {
    /// Authoritative server result
    Complete {
        seq: u64,
        results: ProjectionResults,
    },
    /// Server unreachable; locally synthesized results
    Fallback {
        seq: u64,
        results: ProjectionResults,
        error: String,
    },
    /// Neither the server nor the local fallback produced usable results
    Failed { seq: u64, error: String },
}

/// Background worker that runs projections on a separate thread
pub struct ProjectionWorker {
    job_tx: Sender<ProjectionJob>,
    outcome_rx: Receiver<ProjectionOutcome>,
    thread: Option<JoinHandle<()>>,
}

impl ProjectionWorker {
    /// Spawn the worker with a backend and a parameter snapshot for fallback
    /// generation.
    pub fn spawn<B: ProjectionBackend>(
        backend: B,
        params: ModelParams,
        catalog: InterventionCatalog,
    ) -> Self {
        Self::spawn_with_debounce(backend, params, catalog, DEBOUNCE_WINDOW)
    }

    /// Same as [`ProjectionWorker::spawn`] with an explicit debounce window.
    pub fn spawn_with_debounce<B: ProjectionBackend>(
        backend: B,
        params: ModelParams,
        catalog: InterventionCatalog,
        debounce: Duration,
    ) -> Self {
        let (job_tx, job_rx) = channel();
        let (outcome_tx, outcome_rx) = channel();

        let ctx = WorkerContext {
            backend,
            params,
            catalog,
            debounce,
            outcome_tx,
        };

        let thread = thread::spawn(move || ctx.run(job_rx));

        Self {
            job_tx,
            outcome_rx,
            thread: Some(thread),
        }
    }

    /// Queue a projection; the worker debounces and keeps only the newest.
    pub fn send(&self, seq: u64, request: ProjectionRequest) -> bool {
        self.job_tx
            .send(ProjectionJob::Run { seq, request })
            .is_ok()
    }

    /// Try to receive an outcome (non-blocking)
    pub fn try_recv(&self) -> Option<ProjectionOutcome> {
        self.outcome_rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next outcome
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ProjectionOutcome> {
        self.outcome_rx.recv_timeout(timeout).ok()
    }

    /// Shutdown the worker thread
    pub fn shutdown(&mut self) {
        let _ = self.job_tx.send(ProjectionJob::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for ProjectionWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct WorkerContext<B: ProjectionBackend> {
    backend: B,
    params: ModelParams,
    catalog: InterventionCatalog,
    debounce: Duration,
    outcome_tx: Sender<ProjectionOutcome>,
}

impl<B: ProjectionBackend> WorkerContext<B> {
    fn run(self, job_rx: Receiver<ProjectionJob>) {
        loop {
            // Block until something arrives
            let (mut seq, mut request) = match job_rx.recv() {
                Ok(ProjectionJob::Run { seq, request }) => (seq, request),
                Ok(ProjectionJob::Shutdown) | Err(_) => return,
            };

            // Debounce: keep absorbing newer requests until the channel has
            // been quiet for the whole window
            loop {
                match job_rx.recv_timeout(self.debounce) {
                    Ok(ProjectionJob::Run {
                        seq: newer_seq,
                        request: newer_request,
                    }) => {
                        seq = newer_seq;
                        request = newer_request;
                    }
                    Ok(ProjectionJob::Shutdown) => return,
                    Err(RecvTimeoutError::Timeout) => break,
                    Err(RecvTimeoutError::Disconnected) => return,
                }
            }

            let outcome = self.execute(seq, &request);
            if self.outcome_tx.send(outcome).is_err() {
                return;
            }
        }
    }

    fn execute(&self, seq: u64, request: &ProjectionRequest) -> ProjectionOutcome {
        match self.backend.run_projection(request) {
            Ok(results) => {
                info!(seq, "projection completed");
                ProjectionOutcome::Complete { seq, results }
            }
            Err(api_error) => {
                warn!(seq, "projection call failed: {api_error}; generating fallback");
                let mut rng = rand::rng();
                match offline_results(
                    &request.interventions,
                    &self.catalog,
                    &self.params,
                    request.year,
                    request.n_simulations as usize,
                    &mut rng,
                ) {
                    Ok(results) => ProjectionOutcome::Fallback {
                        seq,
                        results,
                        error: api_error.to_string(),
                    },
                    Err(estimate_error) => ProjectionOutcome::Failed {
                        seq,
                        error: format!("{api_error}; fallback failed: {estimate_error}"),
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use agritwin_core::model::{Quantiles, RawSettings};

    use crate::api::ApiError;

    /// Backend that records every request it actually receives
    struct RecordingBackend {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl ProjectionBackend for RecordingBackend {
        fn run_projection(
            &self,
            request: &ProjectionRequest,
        ) -> Result<ProjectionResults, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ApiError::Server("down for maintenance".to_string()));
            }
            Ok(ProjectionResults {
                // Encode the request year so tests can see which request ran
                probability: f64::from(request.year) / 10_000.0,
                mean_ppp: 6000.0,
                median_ppp: 5800.0,
                std_ppp: 500.0,
                distribution: vec![],
                quantiles: Quantiles {
                    p5: 5000.0,
                    p25: 5400.0,
                    p50: 5800.0,
                    p75: 6300.0,
                    p95: 7100.0,
                },
                drift: 0.08,
                volatility: 0.015,
                structural_index: None,
            })
        }
    }

    fn request(year: i32) -> ProjectionRequest {
        ProjectionRequest {
            interventions: RawSettings::default(),
            n_simulations: 200,
            year,
        }
    }

    #[test]
    fn test_rapid_requests_collapse_to_newest() {
        let calls = Arc::new(AtomicUsize::new(0));
        let backend = RecordingBackend {
            calls: calls.clone(),
            fail: false,
        };
        let mut worker = ProjectionWorker::spawn_with_debounce(
            backend,
            ModelParams::default(),
            InterventionCatalog::default(),
            Duration::from_millis(50),
        );

        for (seq, year) in [(1, 2040), (2, 2045), (3, 2050)] {
            assert!(worker.send(seq, request(year)));
        }

        let outcome = worker.recv_timeout(Duration::from_secs(5)).unwrap();
        match outcome {
            ProjectionOutcome::Complete { seq, results } => {
                assert_eq!(seq, 3);
                assert_eq!(results.probability, 0.205);
            }
            other => panic!("expected Complete, got {other:?}"),
        }

        // Only the newest request hit the backend
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        worker.shutdown();
    }

    #[test]
    fn test_failure_produces_fallback_results() {
        let backend = RecordingBackend {
            calls: Arc::new(AtomicUsize::new(0)),
            fail: true,
        };
        let mut worker = ProjectionWorker::spawn_with_debounce(
            backend,
            ModelParams::default(),
            InterventionCatalog::default(),
            Duration::from_millis(10),
        );

        assert!(worker.send(1, request(2050)));

        let outcome = worker.recv_timeout(Duration::from_secs(5)).unwrap();
        match outcome {
            ProjectionOutcome::Fallback {
                seq,
                results,
                error,
            } => {
                assert_eq!(seq, 1);
                assert!(error.contains("down for maintenance"));
                assert_eq!(results.distribution.len(), 200);
                assert!(results.probability >= 0.0 && results.probability <= 1.0);
            }
            other => panic!("expected Fallback, got {other:?}"),
        }
        worker.shutdown();
    }

    #[test]
    fn test_sequential_requests_each_run() {
        let calls = Arc::new(AtomicUsize::new(0));
        let backend = RecordingBackend {
            calls: calls.clone(),
            fail: false,
        };
        let mut worker = ProjectionWorker::spawn_with_debounce(
            backend,
            ModelParams::default(),
            InterventionCatalog::default(),
            Duration::from_millis(10),
        );

        worker.send(1, request(2040));
        let first = worker.recv_timeout(Duration::from_secs(5)).unwrap();
        worker.send(2, request(2050));
        let second = worker.recv_timeout(Duration::from_secs(5)).unwrap();

        assert!(matches!(first, ProjectionOutcome::Complete { seq: 1, .. }));
        assert!(matches!(second, ProjectionOutcome::Complete { seq: 2, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        worker.shutdown();
    }
}
