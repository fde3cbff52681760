use crate::{CoordError, CoordResult};
use helio_core::constants::{AU_KM, RSUN_KM};

/// A validated physical distance, stored in kilometers.
///
/// Always positive and finite; construction enforces this, which is what
/// makes a zero screen radius or a vantage point at Sun center
/// unrepresentable downstream. Per-point deprojection *results* are plain
/// `f64` instead, because they must be able to carry the NaN sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Distance {
    kilometers: f64,
}

impl Distance {
    /// Creates a Distance from kilometers.
    ///
    /// # Errors
    /// Returns `CoordError::InvalidDistance` if the value is ≤0, infinite,
    /// or NaN.
    pub fn from_kilometers(kilometers: f64) -> CoordResult<Self> {
        if !kilometers.is_finite() || kilometers <= 0.0 {
            return Err(CoordError::invalid_distance(format!(
                "distance must be positive and finite, got {} km",
                kilometers
            )));
        }
        Ok(Self { kilometers })
    }

    /// Creates a Distance from astronomical units.
    pub fn from_au(au: f64) -> CoordResult<Self> {
        Self::from_kilometers(au * AU_KM)
    }

    /// Creates a Distance from meters.
    pub fn from_meters(meters: f64) -> CoordResult<Self> {
        Self::from_kilometers(meters / 1000.0)
    }

    /// Creates a Distance from nominal solar radii.
    pub fn from_solar_radii(radii: f64) -> CoordResult<Self> {
        Self::from_kilometers(radii * RSUN_KM)
    }

    pub fn kilometers(self) -> f64 {
        self.kilometers
    }

    pub fn au(self) -> f64 {
        self.kilometers / AU_KM
    }

    pub fn meters(self) -> f64 {
        self.kilometers * 1000.0
    }

    pub fn solar_radii(self) -> f64 {
        self.kilometers / RSUN_KM
    }
}

impl std::ops::Add for Distance {
    type Output = CoordResult<Self>;

    fn add(self, other: Self) -> Self::Output {
        Self::from_kilometers(self.kilometers + other.kilometers)
    }
}

impl std::ops::Sub for Distance {
    type Output = CoordResult<Self>;

    fn sub(self, other: Self) -> Self::Output {
        Self::from_kilometers(self.kilometers - other.kilometers)
    }
}

impl std::ops::Mul<f64> for Distance {
    type Output = CoordResult<Self>;

    fn mul(self, factor: f64) -> Self::Output {
        Self::from_kilometers(self.kilometers * factor)
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.kilometers.partial_cmp(&other.kilometers)
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kilometers < RSUN_KM {
            write!(f, "{:.3} km", self.kilometers)
        } else if self.kilometers < 0.1 * AU_KM {
            write!(f, "{:.3} Rsun", self.solar_radii())
        } else {
            write!(f, "{:.8} AU", self.au())
        }
    }
}
