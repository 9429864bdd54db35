//! Observer capability for batch progress.

use std::io;

use crate::config::CoverageConfig;

use super::{BatchReport, RunSummary};

/// Receives progress from [`BatchDriver::run`](super::BatchDriver::run).
///
/// Implementations own their side effects (console output, coordinate logs,
/// plotting buffers). An error from any hook aborts the run.
pub trait BatchObserver {
    /// Called once before the first batch.
    fn on_start(&mut self, _params: &RunParameters) -> io::Result<()> {
        Ok(())
    }

    /// Called after every recorded batch.
    fn on_batch(&mut self, report: &BatchReport<'_>) -> io::Result<()>;

    /// Called once after the loop ends, including interrupted runs.
    fn on_finish(&mut self, _summary: &RunSummary) -> io::Result<()> {
        Ok(())
    }
}

/// Parameters of a run, as seen by observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunParameters {
    pub iterations: u64,
    pub batch_size: usize,
    pub shell_radius: f64,
    pub coverage_radius: f64,
    pub reference_count: usize,
}

impl RunParameters {
    /// Parameters for `config` with `reference_count` reference points.
    pub fn from_config(config: &CoverageConfig, reference_count: usize) -> Self {
        Self {
            iterations: config.iterations(),
            batch_size: config.batch_size(),
            shell_radius: config.shell_radius(),
            coverage_radius: config.point_radius(),
            reference_count,
        }
    }
}

/// Observer that ignores everything. Used for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl BatchObserver for NullObserver {
    fn on_batch(&mut self, _report: &BatchReport<'_>) -> io::Result<()> {
        Ok(())
    }
}

/// Forwards every event to several observers, in insertion order.
#[derive(Default)]
pub struct ObserverSet<'a> {
    observers: Vec<&'a mut dyn BatchObserver>,
}

impl<'a> ObserverSet<'a> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub fn push(&mut self, observer: &'a mut dyn BatchObserver) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl BatchObserver for ObserverSet<'_> {
    fn on_start(&mut self, params: &RunParameters) -> io::Result<()> {
        for observer in self.observers.iter_mut() {
            observer.on_start(params)?;
        }
        Ok(())
    }

    fn on_batch(&mut self, report: &BatchReport<'_>) -> io::Result<()> {
        for observer in self.observers.iter_mut() {
            observer.on_batch(report)?;
        }
        Ok(())
    }

    fn on_finish(&mut self, summary: &RunSummary) -> io::Result<()> {
        for observer in self.observers.iter_mut() {
            observer.on_finish(summary)?;
        }
        Ok(())
    }
}
