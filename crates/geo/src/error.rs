//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur while parsing geometry text.
///
/// Coordinate extraction never surfaces these; it maps them to `None`.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Invalid WKT format
    #[error("Invalid WKT format: {0}")]
    InvalidWkt(String),

    /// Invalid coordinate values
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

/// Numeric error codes for logging and client reporting.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid WKT format
    InvalidWkt = 10001,
    /// Invalid coordinate values
    InvalidCoordinate = 10002,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidWkt(_) => GeoErrorCode::InvalidWkt,
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(GeoError::InvalidWkt("x".into()).code() as u32, 10001);
        assert_eq!(
            GeoError::InvalidCoordinate("x".into()).code(),
            GeoErrorCode::InvalidCoordinate
        );
    }
}
