//! Unified error handling for placemap.
//!
//! The filtering and clustering functions themselves are total over valid
//! inputs; errors only arise at the ingestion boundary (malformed upstream
//! data, invalid area selections).

use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, PlacemapError>;

/// Errors raised when validating caller-supplied values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacemapError {
    /// A coordinate component is non-finite or out of range.
    #[error(
        "invalid coordinate ({latitude}, {longitude}): \
         expected finite latitude in [-90, 90] and longitude in [-180, 180]"
    )]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// An area selection radius must be strictly positive.
    #[error("invalid area radius {radius_meters} m: radius must be > 0")]
    InvalidRadius { radius_meters: f64 },
}
