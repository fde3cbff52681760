//! The observer-centered helioprojective frame.
//!
//! A [`Helioprojective`] frame holds an observer (a 3D heliographic
//! position), an observation epoch, and a set of 2D sky positions (Tx, Ty).
//! [`make_3d`](Helioprojective::make_3d) resolves the missing line-of-sight
//! distance for every position: by default against the solar surface sphere,
//! or against whatever [`Screen`] is currently active.
//!
//! Frame axes are observer-centered: x toward Sun center, z toward the
//! projection of solar north, y completing the right-handed set. Tx is the
//! longitude-like angle toward +y, Ty the latitude-like angle toward +z.
//!
//! # Screen activation
//!
//! ```no_run
//! # use helio_coords::{Helioprojective, HeliographicStonyhurst, Screen, SphericalScreen};
//! # fn demo(frame: &Helioprojective, center: HeliographicStonyhurst) -> helio_coords::CoordResult<()> {
//! let screen = Screen::from(SphericalScreen::new(center)?);
//! {
//!     let _active = Helioprojective::assume_screen(screen);
//!     let _with_screen = frame.make_3d()?; // uses the screen
//! } // guard dropped, previous assumption restored
//! let _default = frame.make_3d()?; // back to the solar surface
//! # Ok(())
//! # }
//! ```

use crate::frames::HeliographicStonyhurst;
use crate::screens::Screen;
use crate::{CoordError, CoordResult, Distance, Epoch};
use helio_core::constants::{AU_KM, RSUN_KM};
use helio_core::{Angle, Vector3};
use once_cell::sync::Lazy;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

/// A 2D angular sky position in the helioprojective frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkyPosition {
    tx: Angle,
    ty: Angle,
}

impl SkyPosition {
    pub fn new(tx: Angle, ty: Angle) -> CoordResult<Self> {
        let tx = tx.validate_longitude()?;
        let ty = ty.validate_latitude()?;
        Ok(Self { tx, ty })
    }

    pub fn from_arcseconds(tx_arcsec: f64, ty_arcsec: f64) -> CoordResult<Self> {
        Self::new(
            Angle::from_arcseconds(tx_arcsec),
            Angle::from_arcseconds(ty_arcsec),
        )
    }

    pub fn tx(&self) -> Angle {
        self.tx
    }

    pub fn ty(&self) -> Angle {
        self.ty
    }
}

/// A sky position with its resolved line-of-sight distance in AU.
///
/// `distance_au` is NaN when no physically valid 3D position exists under
/// the active assumption.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedPosition {
    pub tx: Angle,
    pub ty: Angle,
    pub distance_au: f64,
}

/// Observer-centered frame for a batch of 2D sky positions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Helioprojective {
    observer: HeliographicStonyhurst,
    observer_distance: Distance,
    obstime: Epoch,
    rsun: Distance,
    positions: Vec<SkyPosition>,
}

/// Process-wide LIFO stack of active screens, one stack for the frame type.
///
/// The mutex makes individual push/pop/peek operations race-free, but the
/// LIFO scoping discipline itself assumes single-threaded use (guards from
/// different threads would interleave their pops).
static SCREEN_STACK: Lazy<Mutex<Vec<Arc<Screen>>>> = Lazy::new(|| Mutex::new(Vec::new()));

fn stack() -> MutexGuard<'static, Vec<Arc<Screen>>> {
    // the Vec is consistent after every push/pop, so a poisoned lock is
    // still usable
    match SCREEN_STACK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// RAII handle for an active screen assumption.
///
/// Created by [`Helioprojective::assume_screen`]. Dropping the guard pops
/// the screen, restoring whatever assumption was active before, on normal
/// scope exit and on unwinding alike. The type is `!Send`, keeping a scope
/// on the thread that opened it.
#[must_use = "the screen is only active while the guard is alive"]
pub struct ScreenGuard {
    _not_send: PhantomData<*const ()>,
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        stack().pop();
    }
}

impl Helioprojective {
    /// Creates a frame for the given observer, epoch and sky positions.
    ///
    /// The observer must carry a radius (its distance from Sun center); the
    /// solar surface sphere defaults to the nominal solar radius and can be
    /// overridden with [`with_rsun`](Self::with_rsun).
    pub fn new(
        observer: HeliographicStonyhurst,
        obstime: Epoch,
        positions: Vec<SkyPosition>,
    ) -> CoordResult<Self> {
        let observer_distance = observer
            .radius()
            .ok_or(CoordError::MissingObserverDistance)?;

        Ok(Self {
            observer,
            observer_distance,
            obstime,
            rsun: Distance::from_kilometers(RSUN_KM)?,
            positions,
        })
    }

    /// Replaces the radius of the solar surface sphere.
    pub fn with_rsun(mut self, rsun: Distance) -> Self {
        self.rsun = rsun;
        self
    }

    pub fn observer(&self) -> &HeliographicStonyhurst {
        &self.observer
    }

    /// The observer's distance from Sun center.
    pub fn observer_distance(&self) -> Distance {
        self.observer_distance
    }

    pub fn obstime(&self) -> Epoch {
        self.obstime
    }

    pub fn rsun(&self) -> Distance {
        self.rsun
    }

    pub fn positions(&self) -> &[SkyPosition] {
        &self.positions
    }

    /// Unit line-of-sight direction for a sky position, in frame axes.
    pub fn line_of_sight(&self, position: &SkyPosition) -> Vector3 {
        Vector3::from_spherical(position.tx().radians(), position.ty().radians())
    }

    /// Frame basis vectors (x̂, ŷ, ẑ) expressed in heliographic Cartesian
    /// axes: x̂ from observer toward Sun center, ẑ the projection of solar
    /// north, ŷ = ẑ × x̂.
    fn frame_basis(&self) -> CoordResult<(Vector3, Vector3, Vector3)> {
        let observer_vec = self.observer.to_cartesian()?;

        let x_hat = (-observer_vec).normalize();

        let north = Vector3::z_axis();
        let north_projected = north - x_hat * north.dot(&x_hat);
        if north_projected.magnitude_squared() < 1e-24 {
            return Err(CoordError::degenerate_geometry(
                "frame_basis",
                "observer on the solar rotation axis leaves frame north undefined",
            ));
        }
        let z_hat = north_projected.normalize();
        let y_hat = z_hat.cross(&x_hat);

        Ok((x_hat, y_hat, z_hat))
    }

    /// Expresses a heliographic 3D point in frame axes, relative to the
    /// observer, in AU.
    pub fn position_in_frame(&self, point: &HeliographicStonyhurst) -> CoordResult<Vector3> {
        let (x_hat, y_hat, z_hat) = self.frame_basis()?;
        let observer_vec = self.observer.to_cartesian()?;
        let v = point.to_cartesian()? - observer_vec;

        Ok(Vector3::new(v.dot(&x_hat), v.dot(&y_hat), v.dot(&z_hat)) * (1.0 / AU_KM))
    }

    /// The default deprojection: distance along each line of sight to the
    /// solar surface sphere, in AU.
    ///
    /// Uses the near root of the ray/sphere intersection (the visible face
    /// of the disk). Lines of sight that miss the disk get NaN: finite
    /// values mark on-disk positions, NaN marks off-disk ones.
    pub fn default_distances(&self) -> CoordResult<Vec<f64>> {
        let d_observer = self.observer_distance.au();
        let rsun_au = self.rsun.au();
        let sun_center = Vector3::x_axis() * d_observer;
        let c = sun_center.magnitude_squared() - rsun_au * rsun_au;

        Ok(self
            .positions
            .iter()
            .map(|position| {
                let los = self.line_of_sight(position);
                let b = -2.0 * sun_center.dot(&los);
                let discriminant = b * b - 4.0 * c;
                if discriminant < 0.0 {
                    f64::NAN
                } else {
                    (-b - libm::sqrt(discriminant)) / 2.0
                }
            })
            .collect())
    }

    /// Activates a screen for the lifetime of the returned guard.
    ///
    /// Activations nest LIFO: the most recent one is consulted by
    /// [`resolve_distances`](Self::resolve_distances) until its guard drops,
    /// after which the previous one resumes control.
    pub fn assume_screen(screen: Screen) -> ScreenGuard {
        stack().push(Arc::new(screen));
        ScreenGuard {
            _not_send: PhantomData,
        }
    }

    /// The screen currently governing deprojection, if any.
    pub fn current_screen() -> Option<Arc<Screen>> {
        stack().last().cloned()
    }

    /// Resolves the line-of-sight distance for every sky position, in AU.
    ///
    /// With no active screen this is
    /// [`default_distances`](Self::default_distances). With an active screen
    /// the two are blended
    /// per position: a screen with `only_off_disk` keeps finite default
    /// distances and fills the rest from the screen; otherwise the screen
    /// replaces the default everywhere. NaN means no valid 3D position.
    pub fn resolve_distances(&self) -> CoordResult<Vec<f64>> {
        let defaults = self.default_distances()?;

        let Some(screen) = Self::current_screen() else {
            return Ok(defaults);
        };

        let screen_distances = screen.calculate_distance(self)?;
        let only_off_disk = screen.only_off_disk();

        Ok(defaults
            .into_iter()
            .zip(screen_distances)
            .map(|(default, from_screen)| {
                if only_off_disk && default.is_finite() {
                    default
                } else {
                    from_screen
                }
            })
            .collect())
    }

    /// Resolves every sky position to a (Tx, Ty, distance) triple.
    pub fn make_3d(&self) -> CoordResult<Vec<ResolvedPosition>> {
        let distances = self.resolve_distances()?;

        Ok(self
            .positions
            .iter()
            .zip(distances)
            .map(|(position, distance_au)| ResolvedPosition {
                tx: position.tx(),
                ty: position.ty(),
                distance_au,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::{PlanarScreen, SphericalScreen};

    /// Stack-touching tests share process state; serialize them.
    static STACK_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn lock_stack_tests() -> MutexGuard<'static, ()> {
        match STACK_TEST_LOCK.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn synthetic_observer() -> HeliographicStonyhurst {
        HeliographicStonyhurst::with_radius(
            Angle::ZERO,
            Angle::ZERO,
            Distance::from_au(1.0).unwrap(),
        )
        .unwrap()
    }

    fn frame_with_tx(tx_arcsec: &[f64]) -> Helioprojective {
        let positions = tx_arcsec
            .iter()
            .map(|&tx| SkyPosition::from_arcseconds(tx, 0.0).unwrap())
            .collect();
        Helioprojective::new(synthetic_observer(), Epoch::j2000(), positions).unwrap()
    }

    #[test]
    fn test_new_requires_observer_radius() {
        let observer = HeliographicStonyhurst::from_degrees(0.0, 0.0).unwrap();
        let result = Helioprojective::new(observer, Epoch::j2000(), Vec::new());
        assert!(matches!(result, Err(CoordError::MissingObserverDistance)));
    }

    #[test]
    fn test_line_of_sight_axes() {
        let frame = frame_with_tx(&[0.0]);
        let center = SkyPosition::from_arcseconds(0.0, 0.0).unwrap();
        let los = frame.line_of_sight(&center);
        assert!((los.x - 1.0).abs() < 1e-15);

        let west = SkyPosition::new(Angle::HALF_PI, Angle::ZERO).unwrap();
        let los = frame.line_of_sight(&west);
        assert!((los.y - 1.0).abs() < 1e-15);

        let north = SkyPosition::new(Angle::ZERO, Angle::HALF_PI).unwrap();
        let los = frame.line_of_sight(&north);
        assert!((los.z - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_position_in_frame_sun_center() {
        let frame = frame_with_tx(&[0.0]);

        // Sun center sits on the frame x axis at the observer distance.
        // A point 0.5 AU from Sun center on the observer line sits at
        // x = 0.5 AU in frame axes.
        let point = HeliographicStonyhurst::with_radius(
            Angle::ZERO,
            Angle::ZERO,
            Distance::from_au(0.5).unwrap(),
        )
        .unwrap();
        let v = frame.position_in_frame(&point).unwrap();
        assert!((v.x - 0.5).abs() < 1e-12);
        assert!(v.y.abs() < 1e-12 && v.z.abs() < 1e-12);
    }

    #[test]
    fn test_default_distances_disk_center() {
        let frame = frame_with_tx(&[0.0]);
        let distances = frame.default_distances().unwrap();
        let expected = 1.0 - helio_core::constants::RSUN_AU;
        assert!((distances[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_default_distances_off_disk_is_nan() {
        // the limb is at ~959 arcsec for an observer at 1 AU
        let frame = frame_with_tx(&[0.0, 900.0, 1000.0, 2000.0]);
        let distances = frame.default_distances().unwrap();
        assert!(distances[0].is_finite());
        assert!(distances[1].is_finite());
        assert!(distances[2].is_nan());
        assert!(distances[3].is_nan());
    }

    #[test]
    fn test_make_3d_shape() {
        let _serial = lock_stack_tests();
        let frame = frame_with_tx(&[0.0, 500.0]);
        let resolved = frame.make_3d().unwrap();
        assert_eq!(resolved.len(), 2);
        assert!((resolved[1].tx.arcseconds() - 500.0).abs() < 1e-9);
        assert!(resolved[0].distance_au.is_finite());
    }

    #[test]
    fn test_screen_stack_lifo_nesting() {
        let _serial = lock_stack_tests();
        assert!(Helioprojective::current_screen().is_none());

        let outer = Screen::from(
            SphericalScreen::new(synthetic_observer()).unwrap(),
        );
        let inner = Screen::from(
            PlanarScreen::new(synthetic_observer()).unwrap(),
        );

        {
            let _outer_guard = Helioprojective::assume_screen(outer);
            assert!(matches!(
                *Helioprojective::current_screen().unwrap(),
                Screen::Spherical(_)
            ));

            {
                let _inner_guard = Helioprojective::assume_screen(inner);
                assert!(matches!(
                    *Helioprojective::current_screen().unwrap(),
                    Screen::Planar(_)
                ));
            }

            // inner guard dropped: the outer screen resumes control
            assert!(matches!(
                *Helioprojective::current_screen().unwrap(),
                Screen::Spherical(_)
            ));
        }

        assert!(Helioprojective::current_screen().is_none());
    }

    #[test]
    fn test_screen_stack_restored_on_panic() {
        let _serial = lock_stack_tests();
        assert!(Helioprojective::current_screen().is_none());

        let screen = Screen::from(
            SphericalScreen::new(synthetic_observer()).unwrap(),
        );
        let result = std::panic::catch_unwind(|| {
            let _guard = Helioprojective::assume_screen(screen);
            panic!("scope body failed");
        });

        assert!(result.is_err());
        assert!(
            Helioprojective::current_screen().is_none(),
            "screen must be popped even when the scope unwinds"
        );
    }

    #[test]
    fn test_resolve_distances_screen_replaces_default() {
        let _serial = lock_stack_tests();

        let frame = frame_with_tx(&[0.0, 500.0, 2000.0]);
        let screen = Screen::from(
            SphericalScreen::new(synthetic_observer()).unwrap(),
        );

        let _guard = Helioprojective::assume_screen(screen);
        let resolved = frame.resolve_distances().unwrap();

        // screen centered at the observer: every distance equals the
        // observer's distance from Sun center, on-disk or not
        for d in resolved {
            assert!((d - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_resolve_distances_only_off_disk_blend() {
        let _serial = lock_stack_tests();

        let frame = frame_with_tx(&[0.0, 2000.0]);
        let defaults = frame.default_distances().unwrap();
        let screen = Screen::from(
            SphericalScreen::new_only_off_disk(synthetic_observer()).unwrap(),
        );

        let _guard = Helioprojective::assume_screen(screen);
        let resolved = frame.resolve_distances().unwrap();

        // on-disk keeps the default, off-disk takes the screen value
        assert!((resolved[0] - defaults[0]).abs() < 1e-15);
        assert!(defaults[1].is_nan());
        assert!((resolved[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_distances_idempotent() {
        let _serial = lock_stack_tests();
        let frame = frame_with_tx(&[0.0, 700.0, 1500.0]);
        let first = frame.resolve_distances().unwrap();
        let second = frame.resolve_distances().unwrap();
        for (a, b) in first.iter().zip(second.iter()) {
            assert!(a == b || (a.is_nan() && b.is_nan()));
        }
    }
}
