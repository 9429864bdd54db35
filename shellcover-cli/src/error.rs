//! CLI error type and exit codes.

use thiserror::Error;

use shellcover::{ConfigError, CoverageError, InputError};

/// Exit code for a completed run.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for I/O and other runtime failures.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for unreadable or malformed coordinate input.
pub const EXIT_INPUT: i32 = 2;

/// Exit code for invalid configuration.
pub const EXIT_CONFIG: i32 = 3;

/// Exit code for a run stopped by Ctrl-C.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Errors surfaced by the command-line tool.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Input(#[from] InputError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to set signal handler: {0}")]
    Signal(String),

    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}

impl From<CoverageError> for CliError {
    fn from(err: CoverageError) -> Self {
        match err {
            CoverageError::Input(e) => CliError::Input(e),
            CoverageError::Config(e) => CliError::Config(e),
            CoverageError::Io(e) => CliError::Io(e),
        }
    }
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Input(_) => EXIT_INPUT,
            CliError::Config(_) => EXIT_CONFIG,
            CliError::Io(_) | CliError::Signal(_) | CliError::Logging(_) => EXIT_FAILURE,
        }
    }
}
