//! INI configuration file support.
//!
//! Every key is optional; missing keys leave the corresponding setting at
//! whatever the builder already holds.
//!
//! ```ini
//! [shell]
//! radius = 1.0
//! point_radius = 0.2
//!
//! [sampling]
//! iterations = 10000
//! batch_size = 8
//! seed = 42
//! theta_min = 0.0
//! theta_max = 3.141592653589793
//! phi_min = 0.0
//! phi_max = 6.283185307179586
//!
//! [output]
//! quiet = false
//! verbose = false
//! visual = false
//! visual_2d_clamp = 10.0
//! directory = .
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::{Ini, Properties};

use super::ConfigError;

/// Directory under the home directory holding the default config file.
pub const CONFIG_DIR_NAME: &str = ".shellcover";

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Values read from a configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub shell_radius: Option<f64>,
    pub point_radius: Option<f64>,
    pub iterations: Option<u64>,
    pub batch_size: Option<usize>,
    pub seed: Option<u64>,
    pub theta_min: Option<f64>,
    pub theta_max: Option<f64>,
    pub phi_min: Option<f64>,
    pub phi_max: Option<f64>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub visual: Option<bool>,
    pub visual_2d_clamp: Option<f64>,
    pub output_dir: Option<PathBuf>,
}

/// Path of the default configuration file (`~/.shellcover/config.ini`).
///
/// Returns `None` when the home directory cannot be determined.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl ConfigFile {
    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    /// Load the default configuration file if it exists.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load_default() -> Result<Option<Self>, ConfigError> {
        match config_file_path() {
            Some(path) if path.is_file() => Self::load(&path).map(Some),
            _ => Ok(None),
        }
    }

    /// Parse configuration from INI text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(content).map_err(|e| ConfigError::FileRead {
            path: PathBuf::from("<string>"),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut file = ConfigFile::default();

        if let Some(shell) = ini.section(Some("shell")) {
            file.shell_radius = read_value(shell, "shell", "radius")?;
            file.point_radius = read_value(shell, "shell", "point_radius")?;
        }

        if let Some(sampling) = ini.section(Some("sampling")) {
            file.iterations = read_value(sampling, "sampling", "iterations")?;
            file.batch_size = read_value(sampling, "sampling", "batch_size")?;
            file.seed = read_value(sampling, "sampling", "seed")?;
            file.theta_min = read_value(sampling, "sampling", "theta_min")?;
            file.theta_max = read_value(sampling, "sampling", "theta_max")?;
            file.phi_min = read_value(sampling, "sampling", "phi_min")?;
            file.phi_max = read_value(sampling, "sampling", "phi_max")?;
        }

        if let Some(output) = ini.section(Some("output")) {
            file.quiet = read_bool(output, "output", "quiet")?;
            file.verbose = read_bool(output, "output", "verbose")?;
            file.visual = read_bool(output, "output", "visual")?;
            file.visual_2d_clamp = read_value(output, "output", "visual_2d_clamp")?;
            file.output_dir = output
                .get("directory")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from);
        }

        Ok(file)
    }
}

fn read_value<T>(props: &Properties, section: &str, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match props.get(key).map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key: format!("{}.{}", section, key),
                value: raw.to_string(),
                reason: e.to_string(),
            }),
    }
}

fn read_bool(props: &Properties, section: &str, key: &str) -> Result<Option<bool>, ConfigError> {
    match props.get(key).map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => match raw.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(Some(true)),
            "false" | "no" | "off" | "0" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidValue {
                key: format!("{}.{}", section, key),
                value: raw.to_string(),
                reason: "expected true or false".to_string(),
            }),
        },
    }
}
