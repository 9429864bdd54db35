//! Console reporting.

use std::io::{self, Write};

use shellcover::driver::{ProjectionFrame, RunParameters};
use shellcover::{BatchObserver, BatchReport, CoverageConfig, RunSummary};

/// Prints a report line per batch and a final line at the end of the run.
///
/// In quiet mode only the final line is printed.
pub struct ConsoleReporter<W: Write> {
    out: W,
    quiet: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, quiet: bool) -> Self {
        Self { out, quiet }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> BatchObserver for ConsoleReporter<W> {
    fn on_batch(&mut self, report: &BatchReport<'_>) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(
            self.out,
            "{}",
            report
                .estimate
                .report_line(report.iteration, report.iterations)
        )
    }

    fn on_finish(&mut self, summary: &RunSummary) -> io::Result<()> {
        if let Some(estimate) = summary.estimate {
            writeln!(
                self.out,
                "{}",
                estimate.report_line(summary.iterations_completed, summary.iterations)
            )?;
        }
        self.out.flush()
    }
}

/// One-line description of the run configuration.
pub fn describe_config(config: &CoverageConfig, params: &RunParameters) -> String {
    let b = config.bounds();
    format!(
        "shell_radius={} point_radius={} iterations={} batch_size={} references={} \
         theta=[{:.4}, {:.4}] phi=[{:.4}, {:.4}] seed={} visual={} verbose={}",
        params.shell_radius,
        params.coverage_radius,
        params.iterations,
        params.batch_size,
        params.reference_count,
        b.polar_min,
        b.polar_max,
        b.azimuth_min,
        b.azimuth_max,
        config
            .seed()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "random".to_string()),
        config.visual(),
        config.verbose()
    )
}

/// Summary of the projected sample cloud shown after a visual run.
pub fn describe_projection(frame: &ProjectionFrame<'_>) -> String {
    let mut text = format!(
        "projection: frames={} hits={} misses={} references={}",
        frame.frame,
        frame.hits.len(),
        frame.misses.len(),
        frame.reference.len()
    );
    if let Some(b) = frame.bounds {
        text.push_str(&format!(
            " x=[{:.3}, {:.3}] y=[{:.3}, {:.3}]",
            b.min_x, b.max_x, b.min_y, b.max_y
        ));
    }
    text
}
