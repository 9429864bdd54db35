//! Monte Carlo coverage estimator.
//!
//! The estimator holds the reference directions, the coverage radius and the
//! shell radius. Each sample on the shell is a hit when its great-circle
//! distance to at least one reference direction is below the coverage
//! radius. Hit and sample counts accumulate for the life of the estimator.
//!
//! # Example
//!
//! ```ignore
//! use rand::SeedableRng;
//! use shellcover::estimator::{sample_uniform_sphere, CoverageEstimator, SamplingBounds};
//!
//! let mut estimator = CoverageEstimator::new(points.as_slice(), 0.2, 1.0)?;
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//!
//! let batch = sample_uniform_sphere(&mut rng, 1000, &SamplingBounds::full_sphere());
//! estimator.record_batch(&batch);
//!
//! let estimate = estimator.current_estimate().unwrap();
//! println!("covered fraction: {:.4}", estimate.hit_fraction);
//! ```

mod sampler;
mod state;

pub use sampler::{sample_uniform_sphere, SamplingBounds, SurfacePoint};
pub use state::{format_scientific, CoverageEstimate, EstimatorPhase, EstimatorState};

use rayon::prelude::*;

use crate::config::{check_radius, ConfigError, CoverageConfig};
use crate::coord::Cartesian;

/// Batches at least this large are classified on the rayon pool.
pub const PARALLEL_BATCH_THRESHOLD: usize = 4096;

/// Great-circle arc length between two directions on a shell of `radius`.
///
/// Uses the spherical law of cosines. The cosine is clamped to `[-1, 1]` so
/// rounding at coincident or antipodal points cannot produce NaN.
#[inline]
pub fn arc_length(polar_a: f64, azimuth_a: f64, polar_b: f64, azimuth_b: f64, radius: f64) -> f64 {
    let cos_angle = polar_a.cos() * polar_b.cos()
        + polar_a.sin() * polar_b.sin() * (azimuth_a - azimuth_b).abs().cos();
    radius * cos_angle.clamp(-1.0, 1.0).acos()
}

/// Reference direction with its polar trigonometry precomputed.
#[derive(Debug, Clone, Copy)]
struct ReferenceDirection {
    azimuth: f64,
    cos_polar: f64,
    sin_polar: f64,
}

impl ReferenceDirection {
    fn from_cartesian(point: &Cartesian) -> Self {
        let s = point.to_spherical();
        Self {
            azimuth: s.azimuth,
            cos_polar: s.polar.cos(),
            sin_polar: s.polar.sin(),
        }
    }

    #[inline]
    fn central_angle(&self, cos_polar: f64, sin_polar: f64, azimuth: f64) -> f64 {
        let cos_angle = self.cos_polar * cos_polar
            + self.sin_polar * sin_polar * (azimuth - self.azimuth).abs().cos();
        cos_angle.clamp(-1.0, 1.0).acos()
    }
}

/// Classification of a single sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleOutcome {
    pub point: SurfacePoint,
    pub hit: bool,
}

/// Accumulating coverage estimator.
#[derive(Debug, Clone)]
pub struct CoverageEstimator {
    references: Vec<ReferenceDirection>,
    coverage_radius: f64,
    shell_radius: f64,
    state: EstimatorState,
}

impl CoverageEstimator {
    /// Create an estimator for the given reference points.
    ///
    /// Only the direction of each reference point is used; its distance from
    /// the origin is ignored in favour of `shell_radius`.
    pub fn new(
        reference_points: &[Cartesian],
        coverage_radius: f64,
        shell_radius: f64,
    ) -> Result<Self, ConfigError> {
        if reference_points.is_empty() {
            return Err(ConfigError::EmptyReferenceSet);
        }
        check_radius("point radius", coverage_radius)?;
        check_radius("shell radius", shell_radius)?;

        Ok(Self {
            references: reference_points
                .iter()
                .map(ReferenceDirection::from_cartesian)
                .collect(),
            coverage_radius,
            shell_radius,
            state: EstimatorState::new(),
        })
    }

    /// Create an estimator using the radii from `config`.
    pub fn from_config(
        reference_points: &[Cartesian],
        config: &CoverageConfig,
    ) -> Result<Self, ConfigError> {
        Self::new(reference_points, config.point_radius(), config.shell_radius())
    }

    pub fn coverage_radius(&self) -> f64 {
        self.coverage_radius
    }

    pub fn shell_radius(&self) -> f64 {
        self.shell_radius
    }

    /// Number of reference directions.
    pub fn reference_count(&self) -> usize {
        self.references.len()
    }

    pub fn state(&self) -> &EstimatorState {
        &self.state
    }

    /// Whether a sample direction lies within the coverage radius of any
    /// reference direction.
    pub fn evaluate_hit(&self, polar: f64, azimuth: f64) -> bool {
        let (sin_polar, cos_polar) = polar.sin_cos();
        self.references.iter().any(|r| {
            self.shell_radius * r.central_angle(cos_polar, sin_polar, azimuth)
                < self.coverage_radius
        })
    }

    /// Classify every sample without touching the counters.
    pub fn classify_batch(&self, samples: &[SurfacePoint]) -> Vec<SampleOutcome> {
        let classify = |point: &SurfacePoint| SampleOutcome {
            point: *point,
            hit: self.evaluate_hit(point.polar, point.azimuth),
        };

        if samples.len() >= PARALLEL_BATCH_THRESHOLD {
            samples.par_iter().map(classify).collect()
        } else {
            samples.iter().map(classify).collect()
        }
    }

    /// Classify a batch and add it to the counters. Returns the batch's hits.
    pub fn record_batch(&mut self, samples: &[SurfacePoint]) -> u64 {
        let hits = if samples.len() >= PARALLEL_BATCH_THRESHOLD {
            samples
                .par_iter()
                .filter(|p| self.evaluate_hit(p.polar, p.azimuth))
                .count()
        } else {
            samples
                .iter()
                .filter(|p| self.evaluate_hit(p.polar, p.azimuth))
                .count()
        };

        self.state.record(samples.len() as u64, hits as u64);
        hits as u64
    }

    /// Add already-classified outcomes to the counters. Returns the hits.
    pub fn record_outcomes(&mut self, outcomes: &[SampleOutcome]) -> u64 {
        let hits = outcomes.iter().filter(|o| o.hit).count() as u64;
        self.state.record(outcomes.len() as u64, hits);
        hits
    }

    /// Current estimate, or `None` before the first batch.
    pub fn current_estimate(&self) -> Option<CoverageEstimate> {
        self.state.estimate(self.shell_radius)
    }
}
