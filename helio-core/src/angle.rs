//! Core angle type for solar coordinate calculations.
//!
//! Angles are stored internally as radians (f64) but can be constructed from
//! and converted to degrees and arcseconds. Helioprojective sky coordinates
//! are conventionally quoted in arcseconds, heliographic ones in degrees;
//! storing radians avoids repeated conversions during the vector math in
//! between.

use crate::constants::{ARCSEC_PER_RAD, ARCSEC_TO_RAD, DEG_TO_RAD, HALF_PI, PI, RAD_TO_DEG, TWOPI};
use crate::{CoreError, CoreResult, MathErrorKind};
use std::fmt;

/// An angular measurement stored as radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Angle {
    radians: f64,
}

impl Angle {
    /// The zero angle.
    pub const ZERO: Angle = Angle { radians: 0.0 };

    /// 90 degrees.
    pub const HALF_PI: Angle = Angle { radians: HALF_PI };

    /// Creates an angle from radians.
    #[inline]
    pub fn from_radians(radians: f64) -> Self {
        Self { radians }
    }

    /// Creates an angle from degrees.
    #[inline]
    pub fn from_degrees(degrees: f64) -> Self {
        Self {
            radians: degrees * DEG_TO_RAD,
        }
    }

    /// Creates an angle from arcseconds.
    #[inline]
    pub fn from_arcseconds(arcseconds: f64) -> Self {
        Self {
            radians: arcseconds * ARCSEC_TO_RAD,
        }
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.radians
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.radians * RAD_TO_DEG
    }

    #[inline]
    pub fn arcseconds(self) -> f64 {
        self.radians * ARCSEC_PER_RAD
    }

    #[inline]
    pub fn sin(self) -> f64 {
        libm::sin(self.radians)
    }

    #[inline]
    pub fn cos(self) -> f64 {
        libm::cos(self.radians)
    }

    /// Computes sine and cosine simultaneously.
    #[inline]
    pub fn sin_cos(self) -> (f64, f64) {
        libm::sincos(self.radians)
    }

    /// Validates the angle as a latitude: finite and within [-90°, +90°].
    pub fn validate_latitude(self) -> CoreResult<Self> {
        if !self.radians.is_finite() {
            return Err(CoreError::math_error(
                "validate_latitude",
                MathErrorKind::NotFinite,
                "latitude not finite",
            ));
        }
        if self.radians.abs() > HALF_PI + 1e-12 {
            return Err(CoreError::math_error(
                "validate_latitude",
                MathErrorKind::OutOfRange,
                &format!("latitude {}° outside [-90°, +90°]", self.degrees()),
            ));
        }
        Ok(self)
    }

    /// Validates the angle as a longitude: finite, wrapped to (-180°, +180°].
    pub fn validate_longitude(self) -> CoreResult<Self> {
        if !self.radians.is_finite() {
            return Err(CoreError::math_error(
                "validate_longitude",
                MathErrorKind::NotFinite,
                "longitude not finite",
            ));
        }
        let mut wrapped = self.radians % TWOPI;
        if wrapped > PI {
            wrapped -= TWOPI;
        } else if wrapped <= -PI {
            wrapped += TWOPI;
        }
        Ok(Self::from_radians(wrapped))
    }
}

impl std::ops::Add for Angle {
    type Output = Angle;

    fn add(self, other: Angle) -> Angle {
        Angle::from_radians(self.radians + other.radians)
    }
}

impl std::ops::Sub for Angle {
    type Output = Angle;

    fn sub(self, other: Angle) -> Angle {
        Angle::from_radians(self.radians - other.radians)
    }
}

impl std::ops::Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle::from_radians(-self.radians)
    }
}

impl std::ops::Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, factor: f64) -> Angle {
        Angle::from_radians(self.radians * factor)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}°", self.degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversions() {
        let a = Angle::from_degrees(45.0);
        assert!((a.radians() - PI / 4.0).abs() < 1e-15);
        assert!((a.arcseconds() - 162_000.0).abs() < 1e-6);

        let b = Angle::from_arcseconds(3600.0);
        assert!((b.degrees() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sin_cos() {
        let a = Angle::from_degrees(60.0);
        let (s, c) = a.sin_cos();
        assert!((s - a.sin()).abs() < 1e-15);
        assert!((c - a.cos()).abs() < 1e-15);
        assert!((s * s + c * c - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_validate_latitude() {
        assert!(Angle::from_degrees(90.0).validate_latitude().is_ok());
        assert!(Angle::from_degrees(-90.0).validate_latitude().is_ok());
        assert!(Angle::from_degrees(90.1).validate_latitude().is_err());
        assert!(Angle::from_radians(f64::NAN).validate_latitude().is_err());
    }

    #[test]
    fn test_validate_longitude_wraps() {
        let wrapped = Angle::from_degrees(270.0).validate_longitude().unwrap();
        assert!((wrapped.degrees() - (-90.0)).abs() < 1e-10);

        let negative = Angle::from_degrees(-300.0).validate_longitude().unwrap();
        assert!((negative.degrees() - 60.0).abs() < 1e-10);

        let kept = Angle::from_degrees(90.0).validate_longitude().unwrap();
        assert!((kept.degrees() - 90.0).abs() < 1e-10);

        assert!(Angle::from_radians(f64::INFINITY)
            .validate_longitude()
            .is_err());
    }

    #[test]
    fn test_arithmetic() {
        let a = Angle::from_degrees(30.0);
        let b = Angle::from_degrees(15.0);
        assert!(((a + b).degrees() - 45.0).abs() < 1e-12);
        assert!(((a - b).degrees() - 15.0).abs() < 1e-12);
        assert!(((-a).degrees() + 30.0).abs() < 1e-12);
        assert!(((a * 2.0).degrees() - 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        let a = Angle::from_degrees(12.5);
        assert!(a.to_string().contains("12.5"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let original = Angle::from_degrees(45.0);
        let json = serde_json::to_string(&original).unwrap();
        let back: Angle = serde_json::from_str(&json).unwrap();
        assert_eq!(original, back);
    }
}
