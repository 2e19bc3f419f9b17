//! Port contracts for facility persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by facility
//! services.

pub mod repository;

pub use repository::{
    AssetRepository, AssetRepositoryError, AssetRepositoryResult, LocationEvent,
    LocationRepository, LocationRepositoryError, LocationRepositoryResult, LocationWatch,
};
