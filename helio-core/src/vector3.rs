//! 3D Cartesian vectors for frame geometry.
//!
//! Positions are usually handed around as spherical coordinates (longitude,
//! latitude, radius), but ray intersections and frame changes are cleanest in
//! Cartesian form: convert with [`from_spherical`](Vector3::from_spherical),
//! do the vector math, convert back with
//! [`to_spherical`](Vector3::to_spherical).
//!
//! For unit vectors, `a.dot(&b)` is the cosine of the separation angle, and
//! `a.cross(&b)` gives the axis perpendicular to both (right-hand rule),
//! which is how the observer-centered frame basis is built.

use std::fmt;

/// A 3D Cartesian vector.
///
/// Components are public for direct access. The library uses this type for
/// heliocentric positions (in kilometers or AU) and for unit line-of-sight
/// direction vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Creates a new vector from x, y, z components.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the zero vector `[0, 0, 0]`.
    #[inline]
    pub fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Returns the unit vector along the X axis `[1, 0, 0]`.
    #[inline]
    pub fn x_axis() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Returns the unit vector along the Y axis `[0, 1, 0]`.
    #[inline]
    pub fn y_axis() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    /// Returns the unit vector along the Z axis `[0, 0, 1]`.
    #[inline]
    pub fn z_axis() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Returns the Euclidean length (L2 norm) of the vector.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        libm::sqrt(self.magnitude_squared())
    }

    /// Returns the squared magnitude.
    ///
    /// Cheaper than [`magnitude`](Self::magnitude) when only comparisons or
    /// quadratic coefficients are needed.
    #[inline]
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns a unit vector pointing in the same direction.
    ///
    /// If the vector has zero length, returns the zero vector unchanged
    /// (avoids NaN).
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            *self
        } else {
            Self::new(self.x / mag, self.y / mag, self.z / mag)
        }
    }

    /// Computes the dot product with another vector.
    ///
    /// For unit vectors this is the cosine of the angle between them.
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Computes the cross product with another vector (right-hand rule).
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Creates a unit vector from spherical coordinates.
    ///
    /// - `lon`: azimuthal angle from +X toward +Y, in radians
    /// - `lat`: elevation from the XY plane, in radians
    pub fn from_spherical(lon: f64, lat: f64) -> Self {
        let (sin_lon, cos_lon) = libm::sincos(lon);
        let (sin_lat, cos_lat) = libm::sincos(lat);
        Self::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
    }

    /// Returns `(lon, lat)` in radians for the direction of this vector.
    ///
    /// The zero vector maps to `(0, 0)`.
    pub fn to_spherical(&self) -> (f64, f64) {
        let r = self.magnitude();
        if r == 0.0 {
            return (0.0, 0.0);
        }
        let lon = libm::atan2(self.y, self.x);
        let lat = libm::asin(self.z / r);
        (lon, lat)
    }
}

impl std::ops::Add for Vector3 {
    type Output = Vector3;

    fn add(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl std::ops::Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, factor: f64) -> Vector3 {
        Vector3::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.9}, {:.9}, {:.9}]", self.x, self.y, self.z)
    }
}
