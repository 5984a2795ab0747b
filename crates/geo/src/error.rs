//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Latitude or longitude is non-finite or out of range
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate {
        /// Rejected latitude
        latitude: f64,
        /// Rejected longitude
        longitude: f64,
    },
}

/// Error code for integration with ambumap-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid coordinate values
    InvalidCoordinate = 10001,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate { .. } => GeoErrorCode::InvalidCoordinate,
        }
    }
}
