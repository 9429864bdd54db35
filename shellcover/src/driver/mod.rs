//! Batch driver for coverage runs.
//!
//! The driver owns the fixed-budget loop: for every iteration it draws a
//! batch of samples, has the estimator classify and record them, and hands
//! a [`BatchReport`] to a [`BatchObserver`]. It never stops on convergence;
//! only the iteration budget or a [`CancellationToken`] ends a run.
//!
//! # Architecture
//!
//! ```text
//!            ┌──────────────── BatchDriver::run ────────────────┐
//!            │                                                  │
//!  rng ────► │ sample_uniform_sphere ─► CoverageEstimator       │
//!            │                           (classify + record)    │
//!            │                                 │                │
//!            │                          BatchReport ───────────►│──► observer
//!            └──────────────────────────────────────────────────┘    (console,
//!                                                                     hit/miss log,
//!                                                                     disc projection)
//! ```

mod coordinate_log;
mod observer;
mod projection;

pub use coordinate_log::{CoordinateLog, HIT_LOG_FILE, MISS_LOG_FILE};
pub use observer::{BatchObserver, NullObserver, ObserverSet, RunParameters};
pub use projection::{DiscProjection, PlotBounds, ProjectionFrame};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, CoverageConfig};
use crate::coord::{spherical_to_cartesian, Cartesian};
use crate::error::Result;
use crate::estimator::{sample_uniform_sphere, CoverageEstimate, CoverageEstimator, SamplingBounds};

/// Shared flag that asks a running driver to stop at the next batch boundary.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Safe to call from a signal handler thread.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Progress of a single batch.
#[derive(Debug, Clone, Copy)]
pub struct BatchReport<'a> {
    /// 1-based batch number.
    pub iteration: u64,
    /// Planned number of batches.
    pub iterations: u64,
    /// Hits in this batch alone.
    pub batch_hits: u64,
    /// Running estimate after this batch.
    pub estimate: CoverageEstimate,
    /// Hit samples of this batch on the shell. Empty unless collected.
    pub hits: &'a [Cartesian],
    /// Missed samples of this batch on the shell. Empty unless collected.
    pub misses: &'a [Cartesian],
}

/// Outcome of a complete (or interrupted) run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Batches actually recorded.
    pub iterations_completed: u64,
    /// Batches requested.
    pub iterations: u64,
    /// Final estimate; `None` only if the run was cancelled before any batch.
    pub estimate: Option<CoverageEstimate>,
    /// Whether cancellation cut the run short.
    pub interrupted: bool,
    /// Wall-clock duration of the loop.
    pub elapsed: Duration,
}

/// Runs a coverage estimator for a fixed number of batches.
#[derive(Debug, Clone)]
pub struct BatchDriver {
    iterations: u64,
    batch_size: usize,
    bounds: SamplingBounds,
    collect_coordinates: bool,
    cancellation: Option<CancellationToken>,
}

impl BatchDriver {
    /// Create a driver from a validated configuration.
    ///
    /// Coordinates are collected when the config enables visual or verbose
    /// mode.
    pub fn new(config: &CoverageConfig) -> Self {
        Self {
            iterations: config.iterations(),
            batch_size: config.batch_size(),
            bounds: *config.bounds(),
            collect_coordinates: config.collects_coordinates(),
            cancellation: None,
        }
    }

    /// Create a driver from raw parameters.
    pub fn with_params(
        iterations: u64,
        batch_size: usize,
        bounds: SamplingBounds,
    ) -> std::result::Result<Self, ConfigError> {
        if iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        Ok(Self {
            iterations,
            batch_size,
            bounds,
            collect_coordinates: false,
            cancellation: None,
        })
    }

    /// Whether batch reports carry hit/miss coordinates.
    pub fn collect_coordinates(mut self, collect: bool) -> Self {
        self.collect_coordinates = collect;
        self
    }

    /// Stop early when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Run all batches, reporting each to `observer`.
    ///
    /// Iterations are numbered from 1. After the loop `observer.on_finish`
    /// receives the final summary exactly once.
    pub fn run<R: Rng + ?Sized>(
        &self,
        estimator: &mut CoverageEstimator,
        rng: &mut R,
        observer: &mut dyn BatchObserver,
    ) -> Result<RunSummary> {
        let shell_radius = estimator.shell_radius();

        info!(
            iterations = self.iterations,
            batch_size = self.batch_size,
            shell_radius,
            coverage_radius = estimator.coverage_radius(),
            references = estimator.reference_count(),
            "Starting coverage run"
        );

        observer.on_start(&RunParameters {
            iterations: self.iterations,
            batch_size: self.batch_size,
            shell_radius,
            coverage_radius: estimator.coverage_radius(),
            reference_count: estimator.reference_count(),
        })?;

        let started = Instant::now();
        let mut completed = 0;
        let mut interrupted = false;
        let mut hits: Vec<Cartesian> = Vec::new();
        let mut misses: Vec<Cartesian> = Vec::new();

        for iteration in 1..=self.iterations {
            if self.is_cancelled() {
                warn!(completed, iterations = self.iterations, "Coverage run cancelled");
                interrupted = true;
                break;
            }

            let samples = sample_uniform_sphere(rng, self.batch_size, &self.bounds);

            hits.clear();
            misses.clear();
            let batch_hits = if self.collect_coordinates {
                let outcomes = estimator.classify_batch(&samples);
                for outcome in &outcomes {
                    let point =
                        spherical_to_cartesian(shell_radius, outcome.point.polar, outcome.point.azimuth);
                    if outcome.hit {
                        hits.push(point);
                    } else {
                        misses.push(point);
                    }
                }
                estimator.record_outcomes(&outcomes)
            } else {
                estimator.record_batch(&samples)
            };

            let estimate = estimator
                .current_estimate()
                .ok_or(ConfigError::ZeroBatchSize)?;

            debug!(
                iteration,
                batch_hits,
                hit_fraction = estimate.hit_fraction,
                "Batch recorded"
            );

            observer.on_batch(&BatchReport {
                iteration,
                iterations: self.iterations,
                batch_hits,
                estimate,
                hits: &hits,
                misses: &misses,
            })?;
            completed = iteration;
        }

        let summary = RunSummary {
            iterations_completed: completed,
            iterations: self.iterations,
            estimate: estimator.current_estimate(),
            interrupted,
            elapsed: started.elapsed(),
        };

        info!(
            completed,
            samples = estimator.state().samples(),
            hits = estimator.state().hits(),
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Coverage run finished"
        );

        observer.on_finish(&summary)?;
        Ok(summary)
    }
}
