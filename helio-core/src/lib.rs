pub mod angle;
pub mod constants;
pub mod errors;
pub mod vector3;

pub use angle::Angle;
pub use errors::{CoreError, CoreResult, MathErrorKind};
pub use vector3::Vector3;
