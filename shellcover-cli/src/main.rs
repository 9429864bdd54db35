//! ShellCover CLI - Command-line interface
//!
//! Estimates how much of a spherical shell is covered by discs around a set
//! of reference points read from coordinate files.
//!
//! ```text
//! shellcover points.xyz --point-radius 0.2 --iterations 1000 --batch-size 100
//! ```

mod error;
mod logging;
mod report;
mod run;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, warn};

use shellcover::CancellationToken;

use error::{CliError, EXIT_INTERRUPTED, EXIT_SUCCESS};
use run::RunArgs;

#[derive(Debug, Parser)]
#[command(name = "shellcover")]
#[command(version = shellcover::VERSION)]
#[command(about = "Monte Carlo estimate of spherical shell coverage", long_about = None)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,

    /// Log filter directives (e.g. "debug" or "shellcover=trace")
    #[arg(long)]
    log_level: Option<String>,

    /// Also write log events to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let code = match execute(cli) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Run failed");
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };
    process::exit(code);
}

fn execute(cli: Cli) -> Result<i32, CliError> {
    let _guard = logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let cancellation = CancellationToken::new();
    let handler_token = cancellation.clone();
    ctrlc::set_handler(move || {
        eprintln!();
        eprintln!("Received interrupt, finishing current batch...");
        handler_token.cancel();
    })
    .map_err(|e| CliError::Signal(e.to_string()))?;

    let summary = run::run(cli.run, cancellation)?;
    if summary.interrupted {
        warn!(
            completed = summary.iterations_completed,
            requested = summary.iterations,
            "Run interrupted"
        );
        return Ok(EXIT_INTERRUPTED);
    }
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_filenames_and_flags() {
        let cli = Cli::try_parse_from([
            "shellcover",
            "a.xyz",
            "b.xyz",
            "--point-radius",
            "0.3",
            "--batch-size",
            "16",
            "--quiet",
            "--visual-2d-clamp",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.run.filenames.len(), 2);
        assert_eq!(cli.run.point_radius, Some(0.3));
        assert_eq!(cli.run.batch_size, Some(16));
        assert_eq!(cli.run.visual_2d_clamp, Some(5.0));
        assert!(cli.run.quiet);
        assert!(!cli.run.verbose);
    }

    #[test]
    fn test_requires_a_filename() {
        assert!(Cli::try_parse_from(["shellcover", "--quiet"]).is_err());
    }

    #[test]
    fn test_log_options() {
        let cli = Cli::try_parse_from([
            "shellcover",
            "p.xyz",
            "--log-level",
            "debug",
            "--log-file",
            "run.log",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
    }
}
