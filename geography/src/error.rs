//! Error types used by the crate.

use geography_types::error::GeographyTypesError;
use thiserror::Error;

/// Result type of the crate operations.
pub type Result<T> = std::result::Result<T, GeographyError>;

/// Geography error type.
#[derive(Debug, Error, PartialEq)]
pub enum GeographyError {
    /// Coordinates are outside of `[-90, 90]x[-180, 180]` or are not finite numbers.
    #[error("invalid coordinate: lat={lat}, lon={lon}")]
    InvalidCoordinate {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lon: f64,
    },
    /// Latitude is outside of the domain of the mercator projection.
    #[error("latitude {0} is outside of the projection domain")]
    LatitudeOutOfDomain(f64),
    /// Degenerate or malformed geometry.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// Configuration option has invalid value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Operation is not defined for the given geometries.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
    /// Features created by different factories cannot be measured against each other.
    #[error("features belong to different factories")]
    FactoryMismatch,
}

impl From<GeographyTypesError> for GeographyError {
    fn from(value: GeographyTypesError) -> Self {
        match value {
            GeographyTypesError::Conversion(message) => Self::InvalidGeometry(message),
        }
    }
}
