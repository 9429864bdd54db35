//! Running estimator state and the estimate derived from it.

use std::f64::consts::PI;
use std::fmt;

/// Lifecycle phase of an estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorPhase {
    /// No batch recorded yet; the estimate is undefined.
    Uninitialized,
    /// At least one batch recorded.
    Accumulating,
}

/// Sample and hit counters.
///
/// Both counters only grow, and `hits <= samples` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EstimatorState {
    samples: u64,
    hits: u64,
}

impl EstimatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total samples recorded (N).
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Samples classified as hits.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn phase(&self) -> EstimatorPhase {
        if self.samples == 0 {
            EstimatorPhase::Uninitialized
        } else {
            EstimatorPhase::Accumulating
        }
    }

    /// Add a batch of `samples` of which `hits` were hits.
    pub(crate) fn record(&mut self, samples: u64, hits: u64) {
        debug_assert!(hits <= samples);
        self.samples += samples;
        self.hits += hits;
    }

    /// Estimate for a shell of the given radius, `None` before any samples.
    pub fn estimate(&self, shell_radius: f64) -> Option<CoverageEstimate> {
        if self.samples == 0 {
            return None;
        }
        let hit_fraction = self.hits as f64 / self.samples as f64;
        Some(CoverageEstimate {
            shell_radius,
            area: hit_fraction * 4.0 * PI * shell_radius,
            hit_fraction,
            samples: self.samples,
            hits: self.hits,
        })
    }
}

/// Point-in-time coverage estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageEstimate {
    /// Shell radius the estimate refers to.
    pub shell_radius: f64,
    /// Reported covered area: `hit_fraction · 4π · shell_radius`.
    pub area: f64,
    /// `hits / samples`.
    pub hit_fraction: f64,
    /// Samples drawn so far (N).
    pub samples: u64,
    /// Hits so far.
    pub hits: u64,
}

impl CoverageEstimate {
    /// Console report line for batch `iteration` of `iterations`.
    ///
    /// `r=    1.00  12.56637061 N=1 hit%=1.000000e+00 iter=       1/       1`
    pub fn report_line(&self, iteration: u64, iterations: u64) -> String {
        format!(
            "r={:8.2} {:12.8} N={} hit%={:>10} iter={:8}/{:8}",
            self.shell_radius,
            self.area,
            self.samples,
            format_scientific(self.hit_fraction, 6),
            iteration,
            iterations
        )
    }
}

impl fmt::Display for CoverageEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "area={:.8} hit%={} ({}/{} samples)",
            self.area,
            format_scientific(self.hit_fraction, 6),
            self.hits,
            self.samples
        )
    }
}

/// Scientific notation with a signed, two-digit exponent (`5.000000e-01`).
pub fn format_scientific(value: f64, precision: usize) -> String {
    let raw = format!("{:.*e}", precision, value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => raw,
        },
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_uninitialized() {
        let state = EstimatorState::new();
        assert_eq!(state.phase(), EstimatorPhase::Uninitialized);
        assert_eq!(state.estimate(1.0), None);
    }

    #[test]
    fn test_record_accumulates() {
        let mut state = EstimatorState::new();
        state.record(10, 3);
        state.record(5, 5);
        assert_eq!(state.samples(), 15);
        assert_eq!(state.hits(), 8);
        assert_eq!(state.phase(), EstimatorPhase::Accumulating);
    }

    #[test]
    fn test_estimate_formula() {
        let mut state = EstimatorState::new();
        state.record(4, 1);

        let estimate = state.estimate(2.0).unwrap();
        assert_eq!(estimate.hit_fraction, 0.25);
        assert!((estimate.area - 0.25 * 4.0 * PI * 2.0).abs() < 1e-12);
        assert_eq!(estimate.samples, 4);
        assert_eq!(estimate.hits, 1);
    }

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_scientific(1.0, 6), "1.000000e+00");
        assert_eq!(format_scientific(0.5, 6), "5.000000e-01");
        assert_eq!(format_scientific(0.0, 6), "0.000000e+00");
        assert_eq!(format_scientific(0.000123, 3), "1.230e-04");
        assert_eq!(format_scientific(12345.0, 2), "1.23e+04");
    }

    #[test]
    fn test_report_line_layout() {
        let mut state = EstimatorState::new();
        state.record(1, 1);
        let line = state.estimate(1.0).unwrap().report_line(1, 10);
        assert_eq!(
            line,
            "r=    1.00  12.56637061 N=1 hit%=1.000000e+00 iter=       1/      10"
        );
    }

    #[test]
    fn test_report_line_half_coverage() {
        let mut state = EstimatorState::new();
        state.record(200, 100);
        let line = state.estimate(2.5).unwrap().report_line(200, 200);
        assert_eq!(
            line,
            "r=    2.50  15.70796327 N=200 hit%=5.000000e-01 iter=     200/     200"
        );
    }
}
