//! Coordinate value types.

use std::fmt;

/// A point in 3D Cartesian space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cartesian {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Cartesian {
    /// Create a new Cartesian point.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance from the origin.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y).hypot(self.z)
    }

    /// Convert to spherical coordinates.
    #[inline]
    pub fn to_spherical(&self) -> Spherical {
        super::cartesian_to_spherical(self.x, self.y, self.z)
    }
}

impl From<[f64; 3]> for Cartesian {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Cartesian> for [f64; 3] {
    fn from(c: Cartesian) -> Self {
        [c.x, c.y, c.z]
    }
}

impl fmt::Display for Cartesian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// A point in spherical coordinates.
///
/// `polar` is measured from the +z axis and lies in `[0, π]`.
/// `azimuth` is measured from the +x axis toward +y and lies in `(-π, π]`
/// when produced by [`cartesian_to_spherical`](super::cartesian_to_spherical).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spherical {
    /// Distance from the origin.
    pub r: f64,
    /// Polar angle in radians.
    pub polar: f64,
    /// Azimuthal angle in radians.
    pub azimuth: f64,
}

impl Spherical {
    /// Create a new spherical point.
    #[inline]
    pub const fn new(r: f64, polar: f64, azimuth: f64) -> Self {
        Self { r, polar, azimuth }
    }

    /// Convert to Cartesian coordinates.
    #[inline]
    pub fn to_cartesian(&self) -> Cartesian {
        super::spherical_to_cartesian(self.r, self.polar, self.azimuth)
    }
}
