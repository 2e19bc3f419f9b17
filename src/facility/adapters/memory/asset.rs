//! In-memory asset repository keyed by asset ID with a location index.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::facility::{
    domain::{Asset, AssetId, LocationId},
    ports::{AssetRepository, AssetRepositoryError, AssetRepositoryResult},
};

/// Thread-safe in-memory asset repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssetRepository {
    state: Arc<RwLock<AssetState>>,
}

#[derive(Debug, Default)]
struct AssetState {
    assets: HashMap<AssetId, Asset>,
}

impl InMemoryAssetRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssetRepository for InMemoryAssetRepository {
    async fn store(&self, asset: &Asset) -> AssetRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AssetRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.assets.contains_key(&asset.id()) {
            return Err(AssetRepositoryError::DuplicateAsset(asset.id()));
        }
        state.assets.insert(asset.id(), asset.clone());
        Ok(())
    }

    async fn update(&self, asset: &Asset) -> AssetRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AssetRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.assets.contains_key(&asset.id()) {
            return Err(AssetRepositoryError::NotFound(asset.id()));
        }
        state.assets.insert(asset.id(), asset.clone());
        Ok(())
    }

    async fn delete(&self, id: AssetId) -> AssetRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AssetRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.assets.remove(&id).is_none() {
            return Err(AssetRepositoryError::NotFound(id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: AssetId) -> AssetRepositoryResult<Option<Asset>> {
        let state = self.state.read().map_err(|err| {
            AssetRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.assets.get(&id).cloned())
    }

    async fn list_by_location(&self, location: LocationId) -> AssetRepositoryResult<Vec<Asset>> {
        let state = self.state.read().map_err(|err| {
            AssetRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut under: Vec<Asset> = state
            .assets
            .values()
            .filter(|asset| asset.location_id() == location)
            .cloned()
            .collect();
        under.sort_by(|a, b| a.created_at().cmp(&b.created_at()));
        Ok(under)
    }
}
