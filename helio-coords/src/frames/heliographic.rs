//! Heliographic Stonyhurst coordinates.
//!
//! The heliocentric frame against which screens and observers are defined:
//! origin at Sun center, z toward solar north, longitude zero on the
//! meridian facing Earth. A position with a radius attribute is a full 3D
//! point; without one it is a direction on the solar surface sphere.

use crate::{solar, CoordResult, Distance, Epoch};
use helio_core::{Angle, Vector3};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeliographicStonyhurst {
    latitude: Angle,
    longitude: Angle,
    radius: Option<Distance>,
}

impl HeliographicStonyhurst {
    pub fn new(latitude: Angle, longitude: Angle) -> CoordResult<Self> {
        let latitude = latitude.validate_latitude()?;
        let longitude = longitude.validate_longitude()?;

        Ok(Self {
            latitude,
            longitude,
            radius: None,
        })
    }

    pub fn with_radius(latitude: Angle, longitude: Angle, radius: Distance) -> CoordResult<Self> {
        let mut pos = Self::new(latitude, longitude)?;
        pos.radius = Some(radius);
        Ok(pos)
    }

    pub fn from_degrees(lat_deg: f64, lon_deg: f64) -> CoordResult<Self> {
        Self::new(Angle::from_degrees(lat_deg), Angle::from_degrees(lon_deg))
    }

    /// Earth's position in this frame at the given epoch: latitude B0,
    /// longitude zero by definition, radius from the solar ephemeris.
    pub fn earth_observer(epoch: &Epoch) -> CoordResult<Self> {
        Self::with_radius(
            solar::compute_b0(epoch),
            Angle::ZERO,
            solar::sun_earth_distance(epoch)?,
        )
    }

    pub fn latitude(&self) -> Angle {
        self.latitude
    }

    pub fn longitude(&self) -> Angle {
        self.longitude
    }

    pub fn radius(&self) -> Option<Distance> {
        self.radius
    }

    pub fn set_radius(&mut self, radius: Distance) {
        self.radius = Some(radius);
    }

    /// Heliocentric Cartesian position in kilometers.
    ///
    /// # Errors
    /// A position without a radius is a 2D direction with no Cartesian
    /// point; converting one is an invalid-coordinate error.
    pub fn to_cartesian(&self) -> CoordResult<Vector3> {
        let radius = self.radius.ok_or_else(|| {
            crate::CoordError::invalid_coordinate(
                "cannot convert a heliographic position without a radius to a 3D point",
            )
        })?;
        Ok(Vector3::from_spherical(self.longitude.radians(), self.latitude.radians())
            * radius.kilometers())
    }

    /// Builds a position from a heliocentric Cartesian point in kilometers,
    /// recovering the scalar radius (distance from Sun center).
    pub fn from_cartesian(point: Vector3) -> CoordResult<Self> {
        let radius = Distance::from_kilometers(point.magnitude())?;
        let (lon, lat) = point.to_spherical();
        Self::with_radius(Angle::from_radians(lat), Angle::from_radians(lon), radius)
    }
}

impl std::fmt::Display for HeliographicStonyhurst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HeliographicStonyhurst(lat={:.6}°, lon={:.6}°",
            self.latitude.degrees(),
            self.longitude.degrees()
        )?;

        if let Some(radius) = self.radius {
            write!(f, ", r={}", radius)?;
        }

        write!(f, ")")
    }
}
