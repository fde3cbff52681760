pub mod heliographic;
pub mod helioprojective;

pub use heliographic::HeliographicStonyhurst;
pub use helioprojective::{Helioprojective, ResolvedPosition, ScreenGuard, SkyPosition};
