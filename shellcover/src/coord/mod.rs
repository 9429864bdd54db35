//! Coordinate conversion module
//!
//! Provides conversions between Cartesian and spherical coordinates, and the
//! stereographic projection used to flatten shell samples onto a 2D disc for
//! plotting.

mod types;

pub use types::{Cartesian, Spherical};

/// Default clip radius for the disc projection.
///
/// Points near the projection pole map far from the origin; anything beyond
/// this magnitude is pulled back onto the clip circle.
pub const DEFAULT_DISC_CLIP: f64 = 10.0;

/// Converts Cartesian coordinates to spherical coordinates.
///
/// The polar angle lies in `[0, π]` (zero along +z) and the azimuth in
/// `(-π, π]`. The origin maps to `(0, 0, 0)`.
#[inline]
pub fn cartesian_to_spherical(x: f64, y: f64, z: f64) -> Spherical {
    let hxy = x.hypot(y);
    let r = hxy.hypot(z);
    let polar = hxy.atan2(z);
    let azimuth = y.atan2(x);

    Spherical { r, polar, azimuth }
}

/// Converts spherical coordinates to Cartesian coordinates.
#[inline]
pub fn spherical_to_cartesian(r: f64, polar: f64, azimuth: f64) -> Cartesian {
    let r_sin_polar = r * polar.sin();

    Cartesian {
        x: r_sin_polar * azimuth.cos(),
        y: r_sin_polar * azimuth.sin(),
        z: r * polar.cos(),
    }
}

/// Converts a slice of Cartesian points to spherical form, preserving order.
pub fn to_spherical_all(points: &[Cartesian]) -> Vec<Spherical> {
    points.iter().map(Cartesian::to_spherical).collect()
}

/// Projects a point onto the plane `z = 0` from the +z pole.
///
/// Returns `(x / (1 - z), y / (1 - z))`. Results whose magnitude exceeds
/// `clip` are scaled back onto the circle of radius `clip`, keeping their
/// direction. A point exactly at the pole has no finite image and is placed
/// on the clip circle along its azimuth.
pub fn project_onto_disc(point: &Cartesian, clip: f64) -> (f64, f64) {
    let denom = 1.0 - point.z;
    if denom == 0.0 {
        let azimuth = point.y.atan2(point.x);
        return (clip * azimuth.cos(), clip * azimuth.sin());
    }

    let x = point.x / denom;
    let y = point.y / denom;

    let mag = x.hypot(y);
    if mag > clip {
        (x / mag * clip, y / mag * clip)
    } else {
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-12;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {}, got {} (diff {})",
            expected,
            actual,
            (actual - expected).abs()
        );
    }

    #[test]
    fn test_unit_axes_to_spherical() {
        let px = cartesian_to_spherical(1.0, 0.0, 0.0);
        assert_close(px.r, 1.0);
        assert_close(px.polar, FRAC_PI_2);
        assert_close(px.azimuth, 0.0);

        let py = cartesian_to_spherical(0.0, 1.0, 0.0);
        assert_close(py.polar, FRAC_PI_2);
        assert_close(py.azimuth, FRAC_PI_2);

        let pz = cartesian_to_spherical(0.0, 0.0, 2.0);
        assert_close(pz.r, 2.0);
        assert_close(pz.polar, 0.0);

        let nz = cartesian_to_spherical(0.0, 0.0, -3.0);
        assert_close(nz.r, 3.0);
        assert_close(nz.polar, PI);
    }

    #[test]
    fn test_negative_x_axis_azimuth_is_pi() {
        // atan2(+0, -1) is +π, keeping the azimuth in (-π, π]
        let s = cartesian_to_spherical(-1.0, 0.0, 0.0);
        assert_close(s.azimuth, PI);
    }

    #[test]
    fn test_origin_maps_to_zero() {
        let s = cartesian_to_spherical(0.0, 0.0, 0.0);
        assert_eq!(s, Spherical::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_spherical_to_cartesian_known_values() {
        let c = spherical_to_cartesian(2.0, FRAC_PI_2, FRAC_PI_2);
        assert_close(c.x, 0.0);
        assert_close(c.y, 2.0);
        assert_close(c.z, 0.0);

        let south = spherical_to_cartesian(1.0, PI, 0.0);
        assert_close(south.z, -1.0);
    }

    #[test]
    fn test_to_spherical_all_preserves_order() {
        let points = [
            Cartesian::new(0.0, 0.0, 1.0),
            Cartesian::new(0.0, 0.0, -1.0),
            Cartesian::new(1.0, 0.0, 0.0),
        ];
        let converted = to_spherical_all(&points);
        assert_eq!(converted.len(), 3);
        assert_close(converted[0].polar, 0.0);
        assert_close(converted[1].polar, PI);
        assert_close(converted[2].polar, FRAC_PI_2);
    }

    #[test]
    fn test_disc_projection_equator_is_unit_circle() {
        let (x, y) = project_onto_disc(&Cartesian::new(0.0, 1.0, 0.0), DEFAULT_DISC_CLIP);
        assert_close(x, 0.0);
        assert_close(y, 1.0);
    }

    #[test]
    fn test_disc_projection_south_pole_is_origin() {
        let (x, y) = project_onto_disc(&Cartesian::new(0.0, 0.0, -1.0), DEFAULT_DISC_CLIP);
        assert_close(x, 0.0);
        assert_close(y, 0.0);
    }

    #[test]
    fn test_disc_projection_clips_near_pole() {
        let point = spherical_to_cartesian(1.0, 0.01, 0.3);
        let (x, y) = project_onto_disc(&point, 5.0);
        assert_close(x.hypot(y), 5.0);
        assert_close(y.atan2(x), 0.3);
    }

    #[test]
    fn test_disc_projection_pole_is_finite() {
        let (x, y) = project_onto_disc(&Cartesian::new(0.0, 0.0, 1.0), 4.0);
        assert!(x.is_finite() && y.is_finite());
        assert_close(x.hypot(y), 4.0);
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_roundtrip_property(
                r in 1e-3..1e3_f64,
                polar in 1e-6..(PI - 1e-6),
                azimuth in (-PI + 1e-6)..PI
            ) {
                let c = spherical_to_cartesian(r, polar, azimuth);
                let s = cartesian_to_spherical(c.x, c.y, c.z);

                prop_assert!(
                    ((s.r - r) / r).abs() < 1e-12,
                    "Radius roundtrip failed: {} -> {}", r, s.r
                );
                prop_assert!(
                    (s.polar - polar).abs() < 1e-9,
                    "Polar roundtrip failed: {} -> {}", polar, s.polar
                );
                prop_assert!(
                    (s.azimuth - azimuth).abs() < 1e-9,
                    "Azimuth roundtrip failed: {} -> {}", azimuth, s.azimuth
                );
            }

            #[test]
            fn test_spherical_ranges(
                x in -100.0..100.0_f64,
                y in -100.0..100.0_f64,
                z in -100.0..100.0_f64
            ) {
                let s = cartesian_to_spherical(x, y, z);
                prop_assert!(s.r >= 0.0);
                prop_assert!((0.0..=PI).contains(&s.polar));
                prop_assert!(s.azimuth > -PI && s.azimuth <= PI);
            }

            #[test]
            fn test_projection_never_exceeds_clip(
                polar in 0.0..PI,
                azimuth in -PI..PI,
                clip in 0.5..50.0_f64
            ) {
                let point = spherical_to_cartesian(1.0, polar, azimuth);
                let (x, y) = project_onto_disc(&point, clip);
                prop_assert!(x.hypot(y) <= clip * (1.0 + 1e-12));
            }
        }
    }
}
