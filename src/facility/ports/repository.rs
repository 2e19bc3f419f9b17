//! Repository ports for location and asset persistence.

use crate::facility::domain::{Asset, AssetId, Location, LocationId};
use crate::identity::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

/// Result type for location repository operations.
pub type LocationRepositoryResult<T> = Result<T, LocationRepositoryError>;

/// Result type for asset repository operations.
pub type AssetRepositoryResult<T> = Result<T, AssetRepositoryError>;

/// Location persistence contract.
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Stores a new location.
    ///
    /// # Errors
    ///
    /// Returns [`LocationRepositoryError::DuplicateLocation`] when the
    /// location ID already exists.
    async fn store(&self, location: &Location) -> LocationRepositoryResult<()>;

    /// Persists changes to an existing location.
    ///
    /// # Errors
    ///
    /// Returns [`LocationRepositoryError::NotFound`] when the location does
    /// not exist.
    async fn update(&self, location: &Location) -> LocationRepositoryResult<()>;

    /// Deletes a location.
    ///
    /// # Errors
    ///
    /// Returns [`LocationRepositoryError::NotFound`] when the location does
    /// not exist.
    async fn delete(&self, id: LocationId) -> LocationRepositoryResult<()>;

    /// Finds a location by identifier.
    ///
    /// Returns `None` when the location does not exist.
    async fn find_by_id(&self, id: LocationId) -> LocationRepositoryResult<Option<Location>>;

    /// Returns all locations owned by the given admin.
    async fn list_by_owner(&self, owner: UserId) -> LocationRepositoryResult<Vec<Location>>;
}

/// Change notification emitted for a location collection.
///
/// Carried by the one real-time feed the system needs: the admin location
/// list.
#[derive(Debug, Clone)]
pub enum LocationEvent {
    /// A location was stored.
    Created(Location),
    /// A location was updated in place.
    Updated(Location),
    /// A location was deleted.
    Deleted(LocationId),
}

/// Subscription contract for live location-change notifications.
///
/// Only adapters with a push channel implement this; polling adapters
/// simply don't.
pub trait LocationWatch: Send + Sync {
    /// Subscribes to location change events.
    fn subscribe(&self) -> broadcast::Receiver<LocationEvent>;
}

/// Errors returned by location repository implementations.
#[derive(Debug, Clone, Error)]
pub enum LocationRepositoryError {
    /// A location with the same identifier already exists.
    #[error("duplicate location identifier: {0}")]
    DuplicateLocation(LocationId),

    /// The location was not found.
    #[error("location not found: {0}")]
    NotFound(LocationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl LocationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Asset persistence contract.
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// Stores a new asset.
    ///
    /// # Errors
    ///
    /// Returns [`AssetRepositoryError::DuplicateAsset`] when the asset ID
    /// already exists.
    async fn store(&self, asset: &Asset) -> AssetRepositoryResult<()>;

    /// Persists changes to an existing asset.
    ///
    /// # Errors
    ///
    /// Returns [`AssetRepositoryError::NotFound`] when the asset does not
    /// exist.
    async fn update(&self, asset: &Asset) -> AssetRepositoryResult<()>;

    /// Deletes an asset.
    ///
    /// # Errors
    ///
    /// Returns [`AssetRepositoryError::NotFound`] when the asset does not
    /// exist.
    async fn delete(&self, id: AssetId) -> AssetRepositoryResult<()>;

    /// Finds an asset by identifier.
    ///
    /// Returns `None` when the asset does not exist.
    async fn find_by_id(&self, id: AssetId) -> AssetRepositoryResult<Option<Asset>>;

    /// Returns all assets under the given location.
    async fn list_by_location(&self, location: LocationId) -> AssetRepositoryResult<Vec<Asset>>;
}

/// Errors returned by asset repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AssetRepositoryError {
    /// An asset with the same identifier already exists.
    #[error("duplicate asset identifier: {0}")]
    DuplicateAsset(AssetId),

    /// The asset was not found.
    #[error("asset not found: {0}")]
    NotFound(AssetId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AssetRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
