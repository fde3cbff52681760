//! Screen geometries for interpreting off-disk emission.
//!
//! By default, 2D helioprojective coordinates are deprojected onto the solar
//! surface sphere, which leaves everything beyond the limb without a valid
//! 3D position. A [`Screen`] substitutes a different assumption about where
//! the observed emission lies: on a sphere of a given center and radius
//! ([`SphericalScreen`]), or on a plane through Sun center oriented toward a
//! vantage point ([`PlanarScreen`]).
//!
//! Screens are immutable values. Activate one for a lexical scope with
//! [`Helioprojective::assume_screen`]; its `only_off_disk` flag controls
//! whether the screen replaces the surface assumption everywhere or only
//! past the limb.
//!
//! Lines of sight that never meet the screen geometry resolve to NaN, the
//! library-wide "no valid 3D position" value, never to an error.

use crate::frames::{HeliographicStonyhurst, Helioprojective};
use crate::{CoordError, CoordResult, Distance};
use helio_core::Vector3;

/// Far root of `t² − 2(S·D)t + c = 0`, the ray/sphere intersection
/// quadratic with `S·D` the projection of the sphere center onto the ray.
///
/// A negative discriminant (the ray misses the sphere) maps to NaN; a zero
/// discriminant (tangent ray) yields the single repeated root.
#[inline]
fn ray_sphere_far_distance(s_dot_d: f64, c: f64) -> f64 {
    let b = -2.0 * s_dot_d;
    let discriminant = b * b - 4.0 * c;
    if discriminant < 0.0 {
        return f64::NAN;
    }
    (-b + libm::sqrt(discriminant)) / 2.0
}

/// Ray/plane intersection distance `d / (D·n)`.
///
/// IEEE division carries the degenerate cases: a ray parallel to the plane
/// divides by zero and yields ±∞ (or NaN for 0/0), which downstream code
/// treats as "no valid position".
#[inline]
fn ray_plane_distance(d_from_plane: f64, los_dot_normal: f64) -> f64 {
    d_from_plane / los_dot_normal
}

/// Emission assumed to lie on the inside of a sphere.
///
/// The sphere is centered on `center` and its radius is the distance
/// between `center` and Sun center, re-derived from the center coordinate
/// on every query and never cached at construction. A screen centered on the
/// observer reproduces the "zeta = 0" assumption: every sky position
/// resolves to the observer's own distance from Sun center.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SphericalScreen {
    center: HeliographicStonyhurst,
    only_off_disk: bool,
}

impl SphericalScreen {
    /// Creates a screen centered on the given coordinate.
    ///
    /// # Errors
    /// `CoordError::InvalidScreen` if `center` carries no radius: a center
    /// coinciding with Sun center gives the screen sphere zero radius.
    pub fn new(center: HeliographicStonyhurst) -> CoordResult<Self> {
        Self::build(center, false)
    }

    /// Like [`new`](Self::new), but the screen applies only to off-disk
    /// positions; on-disk ones keep the solar surface assumption.
    pub fn new_only_off_disk(center: HeliographicStonyhurst) -> CoordResult<Self> {
        Self::build(center, true)
    }

    fn build(center: HeliographicStonyhurst, only_off_disk: bool) -> CoordResult<Self> {
        if center.radius().is_none() {
            return Err(CoordError::invalid_screen(
                "center",
                "screen center needs a positive distance from Sun center to define \
                 the sphere radius",
            ));
        }
        Ok(Self {
            center,
            only_off_disk,
        })
    }

    pub fn center(&self) -> &HeliographicStonyhurst {
        &self.center
    }

    pub fn only_off_disk(&self) -> bool {
        self.only_off_disk
    }

    /// The sphere radius: the center's distance from Sun center, read from
    /// the center coordinate at call time.
    pub fn radius(&self) -> CoordResult<Distance> {
        self.center.radius().ok_or_else(|| {
            CoordError::invalid_screen("center", "screen center lost its radius")
        })
    }

    /// Distance along each of the frame's lines of sight to the sphere, in
    /// AU; NaN where a line of sight misses the sphere entirely.
    ///
    /// Selects the far intersection: the screen is an enclosing surface
    /// behind the emission, not its near face.
    pub fn calculate_distance(&self, frame: &Helioprojective) -> CoordResult<Vec<f64>> {
        let radius_au = self.radius()?.au();
        let sphere_center = frame.position_in_frame(&self.center)?;
        let c = sphere_center.magnitude_squared() - radius_au * radius_au;

        Ok(frame
            .positions()
            .iter()
            .map(|position| {
                let los = frame.line_of_sight(position);
                ray_sphere_far_distance(sphere_center.dot(&los), c)
            })
            .collect())
    }
}

/// Emission assumed to lie on a plane through Sun center.
///
/// The plane is perpendicular to the line from `vantage_point` to Sun
/// center. With the vantage point at the observer, the plane is the plane
/// of the sky.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanarScreen {
    vantage_point: HeliographicStonyhurst,
    only_off_disk: bool,
}

impl PlanarScreen {
    /// Creates a screen oriented toward the given vantage point.
    ///
    /// # Errors
    /// `CoordError::InvalidScreen` if `vantage_point` carries no radius: a
    /// vantage point coinciding with Sun center leaves the plane normal
    /// undefined.
    pub fn new(vantage_point: HeliographicStonyhurst) -> CoordResult<Self> {
        Self::build(vantage_point, false)
    }

    /// Like [`new`](Self::new), but the screen applies only to off-disk
    /// positions; on-disk ones keep the solar surface assumption.
    pub fn new_only_off_disk(vantage_point: HeliographicStonyhurst) -> CoordResult<Self> {
        Self::build(vantage_point, true)
    }

    fn build(vantage_point: HeliographicStonyhurst, only_off_disk: bool) -> CoordResult<Self> {
        if vantage_point.radius().is_none() {
            return Err(CoordError::invalid_screen(
                "vantage_point",
                "vantage point must be away from Sun center to orient the plane",
            ));
        }
        Ok(Self {
            vantage_point,
            only_off_disk,
        })
    }

    pub fn vantage_point(&self) -> &HeliographicStonyhurst {
        &self.vantage_point
    }

    pub fn only_off_disk(&self) -> bool {
        self.only_off_disk
    }

    /// Distance along each of the frame's lines of sight to the plane, in
    /// AU. Rays parallel to the plane propagate ±∞/NaN.
    pub fn calculate_distance(&self, frame: &Helioprojective) -> CoordResult<Vec<f64>> {
        let d_observer = frame.observer_distance().au();
        let vantage = frame.position_in_frame(&self.vantage_point)?;

        // normal points from the vantage point toward Sun center, which
        // sits at d_observer on the frame x axis
        let normal = (Vector3::x_axis() * d_observer - vantage).normalize();
        let d_from_plane = d_observer * normal.x;

        Ok(frame
            .positions()
            .iter()
            .map(|position| {
                let los = frame.line_of_sight(position);
                ray_plane_distance(d_from_plane, los.dot(&normal))
            })
            .collect())
    }
}

/// A screen assumption: the closed set of supported geometries.
///
/// Dispatch is by variant; there is no open base type, so "constructed the
/// abstract screen" is not a representable state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Screen {
    Spherical(SphericalScreen),
    Planar(PlanarScreen),
}

impl Screen {
    /// Distance along each of the frame's lines of sight to this screen's
    /// surface, in AU, with NaN/±∞ marking positions with no valid
    /// intersection.
    pub fn calculate_distance(&self, frame: &Helioprojective) -> CoordResult<Vec<f64>> {
        match self {
            Screen::Spherical(screen) => screen.calculate_distance(frame),
            Screen::Planar(screen) => screen.calculate_distance(frame),
        }
    }

    /// Whether this screen applies only to off-disk positions.
    pub fn only_off_disk(&self) -> bool {
        match self {
            Screen::Spherical(screen) => screen.only_off_disk(),
            Screen::Planar(screen) => screen.only_off_disk(),
        }
    }
}

impl From<SphericalScreen> for Screen {
    fn from(screen: SphericalScreen) -> Self {
        Self::Spherical(screen)
    }
}

impl From<PlanarScreen> for Screen {
    fn from(screen: PlanarScreen) -> Self {
        Self::Planar(screen)
    }
}
