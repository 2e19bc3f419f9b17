//! Error types for facility domain validation.

use thiserror::Error;

/// Errors returned while constructing facility domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FacilityDomainError {
    /// The location name is empty after trimming.
    #[error("location name must not be empty")]
    EmptyLocationName,

    /// The asset name is empty after trimming.
    #[error("asset name must not be empty")]
    EmptyAssetName,
}
