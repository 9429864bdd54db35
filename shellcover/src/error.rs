//! Crate-level error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::input::InputError;

/// Result type for coverage operations.
pub type Result<T> = std::result::Result<T, CoverageError>;

/// Errors that can end a coverage run.
#[derive(Debug, Error)]
pub enum CoverageError {
    /// Reference coordinates could not be loaded.
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// The run configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An observer failed to write its output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err: CoverageError = ConfigError::ZeroIterations.into();
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("iterations"));
    }

    #[test]
    fn test_input_error_conversion() {
        let err: CoverageError = InputError::NoCoordinates.into();
        assert!(matches!(err, CoverageError::Input(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: CoverageError = io.into();
        assert!(err.to_string().contains("disk full"));
    }
}
