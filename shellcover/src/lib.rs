//! ShellCover - Monte Carlo coverage estimation on a spherical shell
//!
//! This library estimates what fraction of a spherical shell is covered by a
//! set of reference points, each acting as a disc of fixed arc radius. Random
//! points are drawn uniformly over the shell and classified as hit or miss by
//! their great-circle distance to the nearest reference point.
//!
//! # Architecture
//!
//! ```text
//! input ──► ReferencePoints ──► CoverageEstimator ◄── sampler (uniform sphere)
//!                                      │
//!                                      ▼
//!                                 BatchDriver ──► BatchObserver(s)
//!                                                 (console, coordinate log,
//!                                                  disc projection)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use rand::SeedableRng;
//! use shellcover::{BatchDriver, CoverageConfig, CoverageEstimator, NullObserver};
//!
//! let config = CoverageConfig::builder().iterations(1000).seed(7).build()?;
//! let mut estimator = CoverageEstimator::from_config(&points, &config)?;
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let summary = BatchDriver::new(&config).run(&mut estimator, &mut rng, &mut NullObserver)?;
//! println!("{}", summary.estimate.unwrap());
//! ```

pub mod config;
pub mod coord;
pub mod driver;
pub mod error;
pub mod estimator;
pub mod input;

pub use config::{ConfigError, ConfigFile, CoverageConfig, CoverageConfigBuilder};
pub use coord::{Cartesian, Spherical};
pub use driver::{
    BatchDriver, BatchObserver, BatchReport, CancellationToken, CoordinateLog, DiscProjection,
    NullObserver, ObserverSet, RunSummary,
};
pub use error::{CoverageError, Result};
pub use estimator::{CoverageEstimate, CoverageEstimator, EstimatorState, SamplingBounds};
pub use input::{InputError, ReferencePoints};

/// Library version, taken from the package manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
