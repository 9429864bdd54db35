//! Disc projection buffers for plotting frontends.
//!
//! `DiscProjection` turns every batch's hit and miss samples into 2D points
//! via [`project_onto_disc`] and keeps the running axis limits, so a plotting
//! frontend only has to draw [`ProjectionFrame`]s. Samples are projected by
//! direction, so the shell radius does not distort the disc.

use std::io;

use crate::coord::{project_onto_disc, Cartesian};

use super::{BatchObserver, BatchReport};

/// Axis-aligned extent of projected samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl PlotBounds {
    fn from_point((x, y): (f64, f64)) -> Self {
        Self {
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
        }
    }

    fn include(&mut self, (x, y): (f64, f64)) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }
}

/// Everything needed to draw the current state.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionFrame<'a> {
    /// Batches projected so far.
    pub frame: u64,
    pub hits: &'a [(f64, f64)],
    pub misses: &'a [(f64, f64)],
    /// Projected reference directions.
    pub reference: &'a [(f64, f64)],
    /// Extent of hits and misses; `None` until the first sample.
    pub bounds: Option<PlotBounds>,
}

/// Observer accumulating disc-projected samples.
#[derive(Debug, Clone)]
pub struct DiscProjection {
    clip: f64,
    frame: u64,
    hits: Vec<(f64, f64)>,
    misses: Vec<(f64, f64)>,
    reference: Vec<(f64, f64)>,
    bounds: Option<PlotBounds>,
}

/// Scale a point onto the unit sphere. The origin stays put.
fn direction(point: &Cartesian) -> Cartesian {
    let norm = point.norm();
    if norm > 0.0 {
        Cartesian::new(point.x / norm, point.y / norm, point.z / norm)
    } else {
        *point
    }
}

impl DiscProjection {
    /// Create a projection with the given reference points and clip radius.
    pub fn new(reference: &[Cartesian], clip: f64) -> Self {
        Self {
            clip,
            frame: 0,
            hits: Vec::new(),
            misses: Vec::new(),
            reference: reference
                .iter()
                .map(|p| project_onto_disc(&direction(p), clip))
                .collect(),
            bounds: None,
        }
    }

    pub fn clip(&self) -> f64 {
        self.clip
    }

    /// Current drawable state.
    pub fn frame(&self) -> ProjectionFrame<'_> {
        ProjectionFrame {
            frame: self.frame,
            hits: &self.hits,
            misses: &self.misses,
            reference: &self.reference,
            bounds: self.bounds,
        }
    }

    fn project(&mut self, point: &Cartesian) -> (f64, f64) {
        let projected = project_onto_disc(&direction(point), self.clip);
        match self.bounds.as_mut() {
            Some(bounds) => bounds.include(projected),
            None => self.bounds = Some(PlotBounds::from_point(projected)),
        }
        projected
    }
}

impl BatchObserver for DiscProjection {
    fn on_batch(&mut self, report: &BatchReport<'_>) -> io::Result<()> {
        for point in report.hits {
            let projected = self.project(point);
            self.hits.push(projected);
        }
        for point in report.misses {
            let projected = self.project(point);
            self.misses.push(projected);
        }
        self.frame += 1;
        Ok(())
    }
}
