//! Low-precision solar ephemeris.
//!
//! Meeus-style trigonometric series for the Sun's apparent position, good to
//! a few parts in 10⁶ of an AU. That is ample for placing an observer in the
//! heliographic frame; sub-arcsecond ephemeris work is out of scope here.

use crate::{CoordResult, Distance, Epoch};
use helio_core::constants::DEG_TO_RAD;
use helio_core::Angle;

const SOLAR_EQUATOR_INCLINATION_RAD: f64 = 7.25 * DEG_TO_RAD;

const SOLAR_ASCENDING_NODE_J2000_DEG: f64 = 75.76;

/// Earth's distance from Sun center at the given epoch.
pub fn sun_earth_distance(epoch: &Epoch) -> CoordResult<Distance> {
    let t = epoch.centuries_since_j2000();

    let m = (357.52911 + 35999.05029 * t - 0.0001537 * t * t) * DEG_TO_RAD;
    let e = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;

    let c_rad = (1.914602 - 0.004817 * t - 0.000014 * t * t) * DEG_TO_RAD * m.sin()
        + (0.019993 - 0.000101 * t) * DEG_TO_RAD * (2.0 * m).sin()
        + 0.000289 * DEG_TO_RAD * (3.0 * m).sin();

    let true_anomaly = m + c_rad;
    let a = 1.000001018; // semi-major axis in AU

    Distance::from_au(a * (1.0 - e * e) / (1.0 + e * true_anomaly.cos()))
}

/// Heliographic latitude of the sub-Earth point (the solar B0 angle).
///
/// Varies over ±7.25° through the year as Earth crosses the plane of the
/// solar equator.
pub fn compute_b0(epoch: &Epoch) -> Angle {
    let t = epoch.centuries_since_j2000();

    let lambda = apparent_solar_longitude(t);
    let k = (SOLAR_ASCENDING_NODE_J2000_DEG + 1.3958333 * t) * DEG_TO_RAD;

    let theta = lambda - k;
    Angle::from_radians((theta.sin() * SOLAR_EQUATOR_INCLINATION_RAD.sin()).asin())
}

fn apparent_solar_longitude(t: f64) -> f64 {
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    let m = 357.52911 + 35999.05029 * t - 0.0001537 * t * t;
    let m_rad = m * DEG_TO_RAD;

    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m_rad.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m_rad).sin()
        + 0.000289 * (3.0 * m_rad).sin();

    let omega_rad = (125.04 - 1934.136 * t) * DEG_TO_RAD;
    let apparent_lon = l0 + c - 0.00569 - 0.00478 * omega_rad.sin();

    (apparent_lon * DEG_TO_RAD).rem_euclid(helio_core::constants::TWOPI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_earth_distance_range() {
        // perihelion ~0.9833 AU, aphelion ~1.0167 AU
        let epochs = [
            Epoch::j2000(),
            "2020-01-05T00:00:00".parse().unwrap(),
            "2020-07-04T00:00:00".parse().unwrap(),
            "2020-04-08T00:00:00".parse().unwrap(),
        ];
        for epoch in &epochs {
            let d = sun_earth_distance(epoch).unwrap().au();
            assert!(
                (0.983..1.017).contains(&d),
                "Sun-Earth distance {} AU outside annual range",
                d
            );
        }
    }

    #[test]
    fn test_sun_earth_distance_2020_04_08() {
        let epoch: Epoch = "2020-04-08T00:00:00".parse().unwrap();
        let d = sun_earth_distance(&epoch).unwrap().au();
        assert!(
            (d - 1.00125872).abs() < 2e-4,
            "expected ~1.00125872 AU, got {}",
            d
        );
    }

    #[test]
    fn test_b0_range() {
        let epochs = [
            Epoch::j2000(),
            "2020-03-07T00:00:00".parse().unwrap(),
            "2020-06-06T00:00:00".parse().unwrap(),
            "2020-09-08T00:00:00".parse().unwrap(),
        ];
        for epoch in &epochs {
            let b0 = compute_b0(epoch);
            assert!(
                b0.degrees().abs() <= 7.3,
                "B0 = {}° exceeds expected range ±7.25°",
                b0.degrees()
            );
        }
    }

    #[test]
    fn test_b0_near_june_crossing() {
        // Earth crosses the solar equatorial plane in early June and early
        // December; B0 should be small there.
        let epoch: Epoch = "2020-06-06T00:00:00".parse().unwrap();
        let b0 = compute_b0(&epoch);
        assert!(
            b0.degrees().abs() < 1.0,
            "B0 = {}° should be near zero at the June crossing",
            b0.degrees()
        );
    }
}
