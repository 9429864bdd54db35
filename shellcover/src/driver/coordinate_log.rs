//! Hit/miss coordinate logs.
//!
//! Every classified sample is appended to one of two logs, one line per
//! sample in XYZ style:
//!
//! ```text
//! H    0.123   -0.456    0.881
//! ```
//!
//! Both logs are flushed after every batch so partial runs leave complete
//! lines on disk.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::coord::Cartesian;

use super::{BatchObserver, BatchReport};

/// File name of the hit log.
pub const HIT_LOG_FILE: &str = "hit.xyz";

/// File name of the miss log.
pub const MISS_LOG_FILE: &str = "miss.xyz";

/// Observer writing hit and miss coordinates to two writers.
#[derive(Debug)]
pub struct CoordinateLog<W: Write> {
    hit: W,
    miss: W,
    hits_written: u64,
    misses_written: u64,
}

impl CoordinateLog<BufWriter<File>> {
    /// Create (truncating) `hit.xyz` and `miss.xyz` inside `dir`.
    pub fn create(dir: &Path) -> io::Result<Self> {
        let hit_path = dir.join(HIT_LOG_FILE);
        let miss_path = dir.join(MISS_LOG_FILE);
        let hit = BufWriter::new(File::create(&hit_path)?);
        let miss = BufWriter::new(File::create(&miss_path)?);
        debug!(
            hit = %hit_path.display(),
            miss = %miss_path.display(),
            "Opened coordinate logs"
        );
        Ok(Self::new(hit, miss))
    }
}

impl<W: Write> CoordinateLog<W> {
    pub fn new(hit: W, miss: W) -> Self {
        Self {
            hit,
            miss,
            hits_written: 0,
            misses_written: 0,
        }
    }

    pub fn hits_written(&self) -> u64 {
        self.hits_written
    }

    pub fn misses_written(&self) -> u64 {
        self.misses_written
    }

    /// Consume the log and return the hit and miss writers.
    pub fn into_inner(self) -> (W, W) {
        (self.hit, self.miss)
    }
}

fn write_point<W: Write>(out: &mut W, point: &Cartesian) -> io::Result<()> {
    writeln!(out, "H {:8.3} {:8.3} {:8.3}", point.x, point.y, point.z)
}

impl<W: Write> BatchObserver for CoordinateLog<W> {
    fn on_batch(&mut self, report: &BatchReport<'_>) -> io::Result<()> {
        for point in report.hits {
            write_point(&mut self.hit, point)?;
        }
        for point in report.misses {
            write_point(&mut self.miss, point)?;
        }
        self.hits_written += report.hits.len() as u64;
        self.misses_written += report.misses.len() as u64;

        self.hit.flush()?;
        self.miss.flush()
    }
}
