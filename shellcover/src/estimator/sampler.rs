//! Uniform sampling over a spherical shell.
//!
//! Drawing the polar angle uniformly would cluster samples at the poles.
//! Instead `cos(polar)` is drawn uniformly, which gives every patch of the
//! surface the same probability:
//!
//! ```text
//! polar   = acos(cos_min - (cos_min - cos_max) · u)    u ~ U[0, 1)
//! azimuth = azimuth_min + (azimuth_max - azimuth_min) · v    v ~ U[0, 1)
//! ```
//!
//! For the full polar range `cos_min = 1` and `cos_max = -1`, which reduces to
//! `acos(1 - 2u)`. A restricted polar range yields points uniform over the
//! band between the two bounds.

use std::f64::consts::{PI, TAU};

use rand::Rng;

/// A direction on the shell, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfacePoint {
    pub polar: f64,
    pub azimuth: f64,
}

impl SurfacePoint {
    pub const fn new(polar: f64, azimuth: f64) -> Self {
        Self { polar, azimuth }
    }
}

/// Angular region that samples are drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingBounds {
    pub polar_min: f64,
    pub polar_max: f64,
    pub azimuth_min: f64,
    pub azimuth_max: f64,
}

impl SamplingBounds {
    /// The whole sphere: polar `[0, π]`, azimuth `[0, 2π]`.
    pub const fn full_sphere() -> Self {
        Self {
            polar_min: 0.0,
            polar_max: PI,
            azimuth_min: 0.0,
            azimuth_max: TAU,
        }
    }

    /// Fraction of the full sphere's area inside these bounds.
    pub fn area_fraction(&self) -> f64 {
        let band = (self.polar_min.cos() - self.polar_max.cos()) / 2.0;
        let wedge = (self.azimuth_max - self.azimuth_min) / TAU;
        band * wedge
    }
}

impl Default for SamplingBounds {
    fn default() -> Self {
        Self::full_sphere()
    }
}

/// Draw `count` points uniformly distributed over the region in `bounds`.
///
/// Each sample consumes two values from `rng`, polar first, so a seeded
/// generator always reproduces the same batch.
pub fn sample_uniform_sphere<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    bounds: &SamplingBounds,
) -> Vec<SurfacePoint> {
    let cos_min = bounds.polar_min.cos();
    let cos_span = cos_min - bounds.polar_max.cos();
    let azimuth_span = bounds.azimuth_max - bounds.azimuth_min;

    (0..count)
        .map(|_| {
            let u: f64 = rng.random();
            let v: f64 = rng.random();
            let polar = (cos_min - cos_span * u).clamp(-1.0, 1.0).acos();
            let azimuth = bounds.azimuth_min + azimuth_span * v;
            SurfacePoint { polar, azimuth }
        })
        .collect()
}
