pub mod distance;
pub mod epoch;
pub mod errors;
pub mod frames;
pub mod screens;
pub mod solar;

pub use distance::Distance;
pub use epoch::{Epoch, JulianDate, TimeParseError, TimeResult};
pub use errors::{CoordError, CoordResult};

pub use frames::{
    HeliographicStonyhurst, Helioprojective, ResolvedPosition, ScreenGuard, SkyPosition,
};
pub use screens::{PlanarScreen, Screen, SphericalScreen};

pub use helio_core::{Angle, Vector3};
