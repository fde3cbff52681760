use crate::epoch::TimeParseError;
use helio_core::CoreError;
use thiserror::Error;

pub type CoordResult<T> = Result<T, CoordError>;

#[derive(Debug, Error)]
pub enum CoordError {
    #[error("Invalid coordinate: {message}")]
    InvalidCoordinate { message: String },

    #[error("Invalid distance: {message}")]
    InvalidDistance { message: String },

    /// Invalid screen configuration, raised at construction.
    ///
    /// Per-point numeric non-results (a line of sight missing the screen, a
    /// ray parallel to the plane) are NOT errors; they surface as NaN in the
    /// distance output. This variant is reserved for geometry that can never
    /// produce a valid screen, and it names the offending attribute.
    #[error("Invalid screen configuration ({attribute}): {message}")]
    InvalidScreen { attribute: String, message: String },

    #[error("Observer must have a distance from Sun center to deproject coordinates")]
    MissingObserverDistance,

    /// Whole-frame geometric degeneracy (distinct from per-point NaN).
    #[error("Degenerate geometry in {context}: {message}")]
    DegenerateGeometry { context: String, message: String },

    #[error("Epoch parsing failed: {source}")]
    EpochError {
        #[from]
        source: TimeParseError,
    },

    #[error("Core calculation failed: {message}")]
    CoreError { message: String },
}

impl CoordError {
    pub fn invalid_coordinate(message: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            message: message.into(),
        }
    }

    pub fn invalid_distance(message: impl Into<String>) -> Self {
        Self::InvalidDistance {
            message: message.into(),
        }
    }

    pub fn invalid_screen(attribute: &str, message: impl Into<String>) -> Self {
        Self::InvalidScreen {
            attribute: attribute.to_string(),
            message: message.into(),
        }
    }

    pub fn degenerate_geometry(context: &str, message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            context: context.to_string(),
            message: message.into(),
        }
    }
}

impl From<CoreError> for CoordError {
    fn from(error: CoreError) -> Self {
        Self::CoreError {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_screen_names_attribute() {
        let err = CoordError::invalid_screen("vantage_point", "coincides with Sun center");
        let msg = err.to_string();
        assert!(msg.contains("vantage_point"));
        assert!(msg.contains("Sun center"));
    }

    #[test]
    fn test_epoch_error_conversion() {
        let parse_failure = "garbage".parse::<crate::Epoch>().unwrap_err();
        let err: CoordError = parse_failure.into();
        assert!(matches!(err, CoordError::EpochError { .. }));
    }

    #[test]
    fn test_core_error_conversion() {
        let core = CoreError::math_error(
            "validate_latitude",
            helio_core::MathErrorKind::OutOfRange,
            "out of range",
        );
        let err: CoordError = core.into();
        assert!(err.to_string().contains("validate_latitude"));
    }
}
