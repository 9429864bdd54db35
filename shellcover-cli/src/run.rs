//! Coverage run command: resolve settings, load input, drive the estimator.

use std::io;
use std::path::PathBuf;

use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use shellcover::driver::RunParameters;
use shellcover::{
    BatchDriver, CancellationToken, ConfigFile, CoordinateLog, CoverageConfig, CoverageEstimator,
    DiscProjection, ObserverSet, ReferencePoints, RunSummary,
};

use crate::error::CliError;
use crate::report::{describe_config, describe_projection, ConsoleReporter};

/// Arguments for a coverage run.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Input files containing coordinates (x y z per line)
    #[arg(value_name = "FILENAME", required = true)]
    pub filenames: Vec<PathBuf>,

    /// Arc radius of the disc around each point
    #[arg(long)]
    pub point_radius: Option<f64>,

    /// Radius of the spherical shell
    #[arg(long)]
    pub shell_radius: Option<f64>,

    /// Number of batches to draw
    #[arg(long)]
    pub iterations: Option<u64>,

    /// Samples per batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Lower polar bound in radians
    #[arg(long)]
    pub theta_min: Option<f64>,

    /// Upper polar bound in radians
    #[arg(long)]
    pub theta_max: Option<f64>,

    /// Lower azimuth bound in radians
    #[arg(long)]
    pub phi_min: Option<f64>,

    /// Upper azimuth bound in radians
    #[arg(long)]
    pub phi_max: Option<f64>,

    /// Collect projected hit/miss points for plotting
    #[arg(long)]
    pub visual: bool,

    /// Only print the final report line
    #[arg(long)]
    pub quiet: bool,

    /// Write hit.xyz and miss.xyz coordinate logs
    #[arg(long)]
    pub verbose: bool,

    /// Clip radius of the 2D disc projection
    #[arg(long = "visual-2d-clamp")]
    pub visual_2d_clamp: Option<f64>,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory for hit.xyz and miss.xyz
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Configuration file (default: ~/.shellcover/config.ini if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Load the explicit config file, or the default one when it exists.
pub fn load_config_file(path: Option<&std::path::Path>) -> Result<Option<ConfigFile>, CliError> {
    match path {
        Some(path) => Ok(Some(ConfigFile::load(path)?)),
        None => Ok(ConfigFile::load_default()?),
    }
}

impl RunArgs {
    /// Command-line values as an overlay with the same shape as a config file.
    ///
    /// Boolean flags can only switch a mode on.
    pub fn overrides(&self) -> ConfigFile {
        ConfigFile {
            shell_radius: self.shell_radius,
            point_radius: self.point_radius,
            iterations: self.iterations,
            batch_size: self.batch_size,
            seed: self.seed,
            theta_min: self.theta_min,
            theta_max: self.theta_max,
            phi_min: self.phi_min,
            phi_max: self.phi_max,
            quiet: self.quiet.then_some(true),
            verbose: self.verbose.then_some(true),
            visual: self.visual.then_some(true),
            visual_2d_clamp: self.visual_2d_clamp,
            output_dir: self.output_dir.clone(),
        }
    }
}

/// Resolve settings: CLI > config file > defaults.
pub fn resolve_config(args: &RunArgs, file: Option<&ConfigFile>) -> Result<CoverageConfig, CliError> {
    let mut builder = CoverageConfig::builder();
    if let Some(file) = file {
        builder = builder.apply_file(file);
    }
    Ok(builder.apply_file(&args.overrides()).build()?)
}

/// Execute a coverage run and print its report.
pub fn run(args: RunArgs, cancellation: CancellationToken) -> Result<RunSummary, CliError> {
    let file = load_config_file(args.config.as_deref())?;
    let config = resolve_config(&args, file.as_ref())?;
    let points = ReferencePoints::load(&args.filenames)?;
    let mut estimator = CoverageEstimator::from_config(points.as_slice(), &config)?;

    let params = RunParameters::from_config(&config, points.len());
    let description = describe_config(&config, &params);
    info!(config = %description, "Resolved configuration");
    if !config.quiet() {
        eprintln!("{}", description);
    }

    let mut rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut reporter = ConsoleReporter::new(io::stdout(), config.quiet());
    let mut log = if config.verbose() {
        Some(CoordinateLog::create(config.output_dir())?)
    } else {
        None
    };
    let mut projection = if config.visual() {
        Some(DiscProjection::new(points.as_slice(), config.visual_2d_clip()))
    } else {
        None
    };

    let driver = BatchDriver::new(&config).with_cancellation(cancellation);
    let summary = {
        let mut observers = ObserverSet::new();
        observers.push(&mut reporter);
        if let Some(log) = log.as_mut() {
            observers.push(log);
        }
        if let Some(projection) = projection.as_mut() {
            observers.push(projection);
        }
        driver.run(&mut estimator, &mut rng, &mut observers)?
    };

    if let Some(projection) = projection.as_ref() {
        if !config.quiet() {
            println!("{}", describe_projection(&projection.frame()));
        }
    }
    if let Some(log) = log.as_ref() {
        info!(
            hits = log.hits_written(),
            misses = log.misses_written(),
            dir = %config.output_dir().display(),
            "Coordinate logs written"
        );
    }

    Ok(summary)
}
