//! Run configuration.
//!
//! `CoverageConfig` holds every scalar parameter of a coverage run. It can
//! only be obtained through [`CoverageConfig::default`] or the validating
//! [`CoverageConfigBuilder`], so a config in hand always satisfies its
//! invariants:
//!
//! - shell and point radii are positive and finite
//! - iterations and batch size are non-zero
//! - `0 <= polar_min <= polar_max <= π`
//! - `0 <= azimuth_min <= azimuth_max` with a span of at most 2π
//!
//! # Example
//!
//! ```ignore
//! use shellcover::CoverageConfig;
//!
//! let config = CoverageConfig::builder()
//!     .point_radius(0.25)
//!     .iterations(50_000)
//!     .batch_size(64)
//!     .seed(42)
//!     .build()?;
//! ```

mod file;

pub use file::{config_file_path, ConfigFile, CONFIG_DIR_NAME, CONFIG_FILE_NAME};

use std::f64::consts::{PI, TAU};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::coord::DEFAULT_DISC_CLIP;
use crate::estimator::SamplingBounds;

// ==================== Defaults ====================

/// Default shell radius.
pub const DEFAULT_SHELL_RADIUS: f64 = 1.0;

/// Default coverage (point) radius, as an arc length on the shell.
pub const DEFAULT_POINT_RADIUS: f64 = 1.0;

/// Default number of batches per run.
pub const DEFAULT_ITERATIONS: u64 = 10_000;

/// Default samples per batch.
pub const DEFAULT_BATCH_SIZE: usize = 1;

/// Default directory for `hit.xyz` / `miss.xyz`.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Errors raised when a configuration is invalid.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A radius was zero, negative or not finite.
    #[error("{name} must be positive and finite, got {value}")]
    NonPositiveRadius { name: &'static str, value: f64 },

    /// Iteration count was zero.
    #[error("iterations must be at least 1")]
    ZeroIterations,

    /// Batch size was zero.
    #[error("batch size must be at least 1")]
    ZeroBatchSize,

    /// Polar bounds outside `[0, π]` or inverted.
    #[error("invalid polar range [{min}, {max}]: expected 0 <= min <= max <= π")]
    InvalidPolarRange { min: f64, max: f64 },

    /// Azimuth bounds negative, inverted or wider than a full turn.
    #[error("invalid azimuth range [{min}, {max}]: expected 0 <= min <= max, span <= 2π")]
    InvalidAzimuthRange { min: f64, max: f64 },

    /// Disc projection clip was not positive.
    #[error("visual 2D clamp must be positive and finite, got {0}")]
    InvalidClip(f64),

    /// No reference points were supplied.
    #[error("reference point set is empty")]
    EmptyReferenceSet,

    /// A configuration file could not be read or parsed.
    #[error("failed to read config file {path}: {reason}")]
    FileRead { path: PathBuf, reason: String },

    /// A configuration file value could not be parsed.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Validate a radius-like quantity.
pub(crate) fn check_radius(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositiveRadius { name, value })
    }
}

/// Immutable parameters of a coverage run.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageConfig {
    shell_radius: f64,
    point_radius: f64,
    bounds: SamplingBounds,
    iterations: u64,
    batch_size: usize,
    seed: Option<u64>,
    visual: bool,
    quiet: bool,
    verbose: bool,
    visual_2d_clip: f64,
    output_dir: PathBuf,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            shell_radius: DEFAULT_SHELL_RADIUS,
            point_radius: DEFAULT_POINT_RADIUS,
            bounds: SamplingBounds::full_sphere(),
            iterations: DEFAULT_ITERATIONS,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
            visual: false,
            quiet: false,
            verbose: false,
            visual_2d_clip: DEFAULT_DISC_CLIP,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl CoverageConfig {
    /// Start a builder seeded with the defaults.
    pub fn builder() -> CoverageConfigBuilder {
        CoverageConfigBuilder::new()
    }

    /// Radius of the shell being sampled.
    pub fn shell_radius(&self) -> f64 {
        self.shell_radius
    }

    /// Arc radius of the disc around each reference point.
    pub fn point_radius(&self) -> f64 {
        self.point_radius
    }

    /// Angular region samples are drawn from.
    pub fn bounds(&self) -> &SamplingBounds {
        &self.bounds
    }

    /// Number of batches in a run.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Samples drawn per batch.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Seed for the random source, if the run should be reproducible.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether per-batch coordinates are fed to a visualization frontend.
    pub fn visual(&self) -> bool {
        self.visual
    }

    /// Whether per-batch console reporting is suppressed.
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Whether hit/miss coordinates are logged to disk.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Clip radius for the disc projection.
    pub fn visual_2d_clip(&self) -> f64 {
        self.visual_2d_clip
    }

    /// Directory for coordinate logs.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Whether the driver must collect per-sample coordinates.
    pub fn collects_coordinates(&self) -> bool {
        self.visual || self.verbose
    }

    /// Total number of samples a complete run draws.
    pub fn total_samples(&self) -> u64 {
        self.iterations.saturating_mul(self.batch_size as u64)
    }
}

/// Builder for [`CoverageConfig`].
///
/// Setters never fail; all checks run in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct CoverageConfigBuilder {
    config: CoverageConfig,
}

impl CoverageConfigBuilder {
    /// Create a builder holding the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shell_radius(mut self, radius: f64) -> Self {
        self.config.shell_radius = radius;
        self
    }

    pub fn point_radius(mut self, radius: f64) -> Self {
        self.config.point_radius = radius;
        self
    }

    /// Set the polar bounds in radians.
    pub fn polar_range(mut self, min: f64, max: f64) -> Self {
        self.config.bounds.polar_min = min;
        self.config.bounds.polar_max = max;
        self
    }

    /// Set the azimuth bounds in radians.
    pub fn azimuth_range(mut self, min: f64, max: f64) -> Self {
        self.config.bounds.azimuth_min = min;
        self.config.bounds.azimuth_max = max;
        self
    }

    pub fn iterations(mut self, iterations: u64) -> Self {
        self.config.iterations = iterations;
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn visual(mut self, visual: bool) -> Self {
        self.config.visual = visual;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.config.quiet = quiet;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn visual_2d_clip(mut self, clip: f64) -> Self {
        self.config.visual_2d_clip = clip;
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Overlay every value set in a configuration file.
    pub fn apply_file(mut self, file: &ConfigFile) -> Self {
        let c = &mut self.config;
        if let Some(v) = file.shell_radius {
            c.shell_radius = v;
        }
        if let Some(v) = file.point_radius {
            c.point_radius = v;
        }
        if let Some(v) = file.iterations {
            c.iterations = v;
        }
        if let Some(v) = file.batch_size {
            c.batch_size = v;
        }
        if let Some(v) = file.seed {
            c.seed = Some(v);
        }
        if let Some(v) = file.theta_min {
            c.bounds.polar_min = v;
        }
        if let Some(v) = file.theta_max {
            c.bounds.polar_max = v;
        }
        if let Some(v) = file.phi_min {
            c.bounds.azimuth_min = v;
        }
        if let Some(v) = file.phi_max {
            c.bounds.azimuth_max = v;
        }
        if let Some(v) = file.quiet {
            c.quiet = v;
        }
        if let Some(v) = file.verbose {
            c.verbose = v;
        }
        if let Some(v) = file.visual {
            c.visual = v;
        }
        if let Some(v) = file.visual_2d_clamp {
            c.visual_2d_clip = v;
        }
        if let Some(ref v) = file.output_dir {
            c.output_dir = v.clone();
        }
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> Result<CoverageConfig, ConfigError> {
        let c = self.config;

        check_radius("shell radius", c.shell_radius)?;
        check_radius("point radius", c.point_radius)?;

        if c.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if c.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }

        let b = &c.bounds;
        let polar_ok = b.polar_min.is_finite()
            && b.polar_max.is_finite()
            && 0.0 <= b.polar_min
            && b.polar_min <= b.polar_max
            && b.polar_max <= PI;
        if !polar_ok {
            return Err(ConfigError::InvalidPolarRange {
                min: b.polar_min,
                max: b.polar_max,
            });
        }

        let azimuth_ok = b.azimuth_min.is_finite()
            && b.azimuth_max.is_finite()
            && 0.0 <= b.azimuth_min
            && b.azimuth_min <= b.azimuth_max
            && b.azimuth_max - b.azimuth_min <= TAU;
        if !azimuth_ok {
            return Err(ConfigError::InvalidAzimuthRange {
                min: b.azimuth_min,
                max: b.azimuth_max,
            });
        }

        if !(c.visual_2d_clip.is_finite() && c.visual_2d_clip > 0.0) {
            return Err(ConfigError::InvalidClip(c.visual_2d_clip));
        }

        Ok(c)
    }
}
