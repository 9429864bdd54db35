//! Reference coordinate loading.
//!
//! Coordinate files are plain text: one point per row, three
//! whitespace-separated numbers (`x y z`). Blank lines are skipped and
//! anything after a `#` is treated as a comment. Several files are
//! concatenated in the order given.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::coord::Cartesian;

/// Errors that can occur while loading reference coordinates.
#[derive(Debug, Error)]
pub enum InputError {
    /// No input files were given.
    #[error("no coordinate files given")]
    NoFiles,

    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A row did not hold exactly three fields.
    #[error("{path}:{line}: expected 3 coordinates, found {found}")]
    FieldCount {
        path: PathBuf,
        line: usize,
        found: usize,
    },

    /// A field was not a finite number.
    #[error("{path}:{line}: invalid coordinate '{value}'")]
    InvalidNumber {
        path: PathBuf,
        line: usize,
        value: String,
    },

    /// All inputs were empty.
    #[error("no coordinates found in input")]
    NoCoordinates,
}

/// Ordered, immutable set of reference points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReferencePoints {
    points: Vec<Cartesian>,
}

impl ReferencePoints {
    /// Wrap an already-loaded list of points.
    pub fn new(points: Vec<Cartesian>) -> Self {
        Self { points }
    }

    /// Load and concatenate coordinate files.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, InputError> {
        if paths.is_empty() {
            return Err(InputError::NoFiles);
        }

        let mut points = Vec::new();
        for path in paths {
            let path = path.as_ref();
            let content = fs::read_to_string(path).map_err(|source| InputError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let before = points.len();
            parse_into(&content, path, &mut points)?;
            debug!(path = %path.display(), count = points.len() - before, "Loaded coordinates");
        }

        if points.is_empty() {
            return Err(InputError::NoCoordinates);
        }

        Ok(Self { points })
    }

    /// Parse coordinates from text. `source` names the origin in errors.
    pub fn parse(content: &str, source: &Path) -> Result<Self, InputError> {
        let mut points = Vec::new();
        parse_into(content, source, &mut points)?;
        if points.is_empty() {
            return Err(InputError::NoCoordinates);
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[Cartesian] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cartesian> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a ReferencePoints {
    type Item = &'a Cartesian;
    type IntoIter = std::slice::Iter<'a, Cartesian>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

fn parse_into(content: &str, path: &Path, out: &mut Vec<Cartesian>) -> Result<(), InputError> {
    for (index, raw_line) in content.lines().enumerate() {
        let line = index + 1;
        let data = raw_line.split('#').next().unwrap_or("");

        let fields: Vec<&str> = data.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != 3 {
            return Err(InputError::FieldCount {
                path: path.to_path_buf(),
                line,
                found: fields.len(),
            });
        }

        let mut xyz = [0.0_f64; 3];
        for (slot, field) in xyz.iter_mut().zip(&fields) {
            *slot = field
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| InputError::InvalidNumber {
                    path: path.to_path_buf(),
                    line,
                    value: field.to_string(),
                })?;
        }
        out.push(Cartesian::from(xyz));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn src() -> &'static Path {
        Path::new("test.xyz")
    }

    #[test]
    fn test_parse_rows() {
        let points = ReferencePoints::parse("1 2 3\n-4.5 0 1e-3\n", src()).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points.as_slice()[0], Cartesian::new(1.0, 2.0, 3.0));
        assert_eq!(points.as_slice()[1], Cartesian::new(-4.5, 0.0, 0.001));
    }

    #[test]
    fn test_parse_skips_blanks_and_comments() {
        let content = "# header\n\n  0 0 1   # north pole\n\t0 0 -1\n";
        let points = ReferencePoints::parse(content, src()).unwrap();
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_parse_wrong_field_count() {
        let err = ReferencePoints::parse("1 2 3\n1 2\n", src()).unwrap_err();
        assert!(matches!(
            err,
            InputError::FieldCount {
                line: 2,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_invalid_number() {
        let err = ReferencePoints::parse("1 two 3\n", src()).unwrap_err();
        match err {
            InputError::InvalidNumber { line, value, .. } => {
                assert_eq!(line, 1);
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        let err = ReferencePoints::parse("1 nan 3\n", src()).unwrap_err();
        assert!(matches!(err, InputError::InvalidNumber { .. }));
    }

    #[test]
    fn test_parse_empty_is_error() {
        let err = ReferencePoints::parse("# nothing\n", src()).unwrap_err();
        assert!(matches!(err, InputError::NoCoordinates));
    }

    #[test]
    fn test_load_concatenates_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.xyz");
        let b = dir.path().join("b.xyz");
        std::fs::File::create(&a)
            .unwrap()
            .write_all(b"0 0 1\n")
            .unwrap();
        std::fs::File::create(&b)
            .unwrap()
            .write_all(b"0 0 -1\n1 0 0\n")
            .unwrap();

        let points = ReferencePoints::load(&[&a, &b]).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points.as_slice()[0].z, 1.0);
        assert_eq!(points.as_slice()[1].z, -1.0);
        assert_eq!(points.as_slice()[2].x, 1.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ReferencePoints::load(&["/nonexistent/points.xyz"]).unwrap_err();
        assert!(matches!(err, InputError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/points.xyz"));
    }

    #[test]
    fn test_load_no_files() {
        let paths: [&str; 0] = [];
        assert!(matches!(
            ReferencePoints::load(&paths).unwrap_err(),
            InputError::NoFiles
        ));
    }
}
