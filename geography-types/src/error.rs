//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum GeographyTypesError {
    /// Input could not be converted into the requested geometry.
    #[error("invalid input geometry: {0}")]
    Conversion(String),
}
