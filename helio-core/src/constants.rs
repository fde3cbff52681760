pub const J2000_JD: f64 = 2451545.0;

pub const MJD_ZERO_POINT: f64 = 2_400_000.5;

pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

pub const SECONDS_PER_DAY_F64: f64 = 86_400.0;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const PI: f64 = 3.141592653589793238462643;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const HALF_PI: f64 = 1.5707963267948966192313216;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const TWOPI: f64 = 6.283185307179586476925287;

#[allow(clippy::excessive_precision)]
pub const DEG_TO_RAD: f64 = 1.745329251994329576923691e-2;

#[allow(clippy::excessive_precision)]
pub const RAD_TO_DEG: f64 = 57.29577951308232087679815;

#[allow(clippy::excessive_precision)]
pub const ARCSEC_TO_RAD: f64 = 4.848136811095359935899141e-6;

#[allow(clippy::excessive_precision)]
pub const ARCSEC_PER_RAD: f64 = 206264.8062470963551564734;

/// Astronomical Unit in meters (IAU 2012 definition, exact)
pub const AU_M: f64 = 149_597_870_700.0;

/// Astronomical Unit in kilometers (derived from IAU 2012 definition)
pub const AU_KM: f64 = 149_597_870.7;

/// Nominal solar radius in kilometers (IAU 2015 Resolution B3).
///
/// This is the default radius of the solar surface sphere used when
/// deprojecting 2D sky coordinates onto the visible disk.
pub const RSUN_KM: f64 = 695_700.0;

/// Nominal solar radius in meters (IAU 2015 Resolution B3)
pub const RSUN_M: f64 = 695_700_000.0;

/// Nominal solar radius expressed in AU
pub const RSUN_AU: f64 = RSUN_KM / AU_KM;
