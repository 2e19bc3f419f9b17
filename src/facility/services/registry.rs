//! Service layer for location and asset administration.
//!
//! All operations take the caller's [`Identity`] explicitly and reject
//! role or ownership mismatches before any write.

use crate::facility::{
    domain::{
        Asset, AssetEdit, AssetId, FacilityDomainError, Location, LocationEdit, LocationId,
    },
    ports::{
        AssetRepository, AssetRepositoryError, LocationRepository, LocationRepositoryError,
    },
};
use crate::identity::domain::{Identity, PermissionError};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLocationRequest {
    name: String,
    address: String,
    description: String,
}

impl CreateLocationRequest {
    /// Creates a request with the required name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: String::new(),
            description: String::new(),
        }
    }

    /// Sets the street address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Request payload for creating an asset under a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAssetRequest {
    location_id: LocationId,
    name: String,
    description: String,
}

impl CreateAssetRequest {
    /// Creates a request with the required parent location and name.
    #[must_use]
    pub fn new(location_id: LocationId, name: impl Into<String>) -> Self {
        Self {
            location_id,
            name: name.into(),
            description: String::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Step of the cascading delete plan at which a child failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStage {
    /// Enumerating the tasks under one asset.
    TaskQuery,
    /// Deleting one task.
    TaskDelete,
    /// Deleting one asset.
    AssetDelete,
}

/// One child that could not be removed during a cascading delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeFailure {
    /// Plan step that failed.
    pub stage: CascadeStage,
    /// Rendered identifier of the child.
    pub id: String,
    /// Underlying failure description.
    pub reason: String,
}

/// Outcome of a cascading location delete.
///
/// The plan never aborts on a child failure; it records the child and
/// moves on, so orphaned children are detectable rather than silent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeReport {
    /// Number of tasks removed.
    pub deleted_tasks: usize,
    /// Number of assets removed.
    pub deleted_assets: usize,
    /// Children that were not removed.
    pub failures: Vec<CascadeFailure>,
}

impl CascadeReport {
    /// Returns whether every child was removed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Service-level errors for facility operations.
#[derive(Debug, Error)]
pub enum FacilityServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] FacilityDomainError),
    /// The caller lacks the role or ownership for the operation.
    #[error(transparent)]
    Permission(#[from] PermissionError),
    /// Location repository operation failed.
    #[error(transparent)]
    LocationRepository(#[from] LocationRepositoryError),
    /// Asset repository operation failed.
    #[error(transparent)]
    AssetRepository(#[from] AssetRepositoryError),
    /// Task repository operation failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
    /// The referenced location does not exist.
    #[error("location not found: {0}")]
    LocationNotFound(LocationId),
    /// The referenced asset does not exist.
    #[error("asset not found: {0}")]
    AssetNotFound(AssetId),
}

/// Result type for facility service operations.
pub type FacilityServiceResult<T> = Result<T, FacilityServiceError>;

/// Location and asset administration service.
#[derive(Clone)]
pub struct FacilityService<L, A, T, C>
where
    L: LocationRepository,
    A: AssetRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    locations: Arc<L>,
    assets: Arc<A>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<L, A, T, C> FacilityService<L, A, T, C>
where
    L: LocationRepository,
    A: AssetRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new facility service.
    #[must_use]
    pub const fn new(locations: Arc<L>, assets: Arc<A>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            locations,
            assets,
            tasks,
            clock,
        }
    }

    /// Creates a location owned by the calling admin.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityServiceError`] when the caller is not an admin,
    /// the name is blank, or persistence fails.
    pub async fn create_location(
        &self,
        identity: &Identity,
        request: CreateLocationRequest,
    ) -> FacilityServiceResult<Location> {
        identity.require_admin("create location")?;
        let location = Location::new(
            identity.uid(),
            request.name,
            request.address,
            request.description,
            &*self.clock,
        )?;
        self.locations.store(&location).await?;
        tracing::info!(location = %location.id(), "location created");
        Ok(location)
    }

    /// Applies a partial edit to a location the caller owns.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityServiceError`] when the caller is not the owning
    /// admin, the location does not exist, the edit is invalid, or
    /// persistence fails.
    pub async fn update_location(
        &self,
        identity: &Identity,
        location_id: LocationId,
        edit: LocationEdit,
    ) -> FacilityServiceResult<Location> {
        identity.require_admin("update location")?;
        let mut location = self.owned_location(identity, location_id).await?;
        location.apply_edit(edit, &*self.clock)?;
        self.locations.update(&location).await?;
        Ok(location)
    }

    /// Deletes a location the caller owns, cascading through its assets
    /// and their tasks.
    ///
    /// Children are deleted depth-first (tasks, then assets, then the
    /// location). A failing child is recorded in the report and the plan
    /// continues; completion history is never part of the plan.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityServiceError`] when the caller is not the owning
    /// admin, the location does not exist, the asset enumeration fails, or
    /// deleting the location record itself fails.
    pub async fn delete_location(
        &self,
        identity: &Identity,
        location_id: LocationId,
    ) -> FacilityServiceResult<CascadeReport> {
        identity.require_admin("delete location")?;
        let location = self.owned_location(identity, location_id).await?;

        let mut report = CascadeReport::default();
        let assets = self.assets.list_by_location(location.id()).await?;
        for asset in assets {
            self.cascade_asset(&asset, &mut report).await;
        }
        self.locations.delete(location.id()).await?;

        if report.is_clean() {
            tracing::info!(
                location = %location_id,
                tasks = report.deleted_tasks,
                assets = report.deleted_assets,
                "location cascade delete complete"
            );
        } else {
            tracing::warn!(
                location = %location_id,
                failed_children = report.failures.len(),
                "location deleted with unremoved children"
            );
        }
        Ok(report)
    }

    /// Creates an asset under a location the caller owns.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityServiceError`] when the caller is not the owning
    /// admin, the location does not exist, the name is blank, or
    /// persistence fails.
    pub async fn create_asset(
        &self,
        identity: &Identity,
        request: CreateAssetRequest,
    ) -> FacilityServiceResult<Asset> {
        identity.require_admin("create asset")?;
        let location = self.owned_location(identity, request.location_id).await?;
        let asset = Asset::new(
            location.id(),
            request.name,
            request.description,
            &*self.clock,
        )?;
        self.assets.store(&asset).await?;
        Ok(asset)
    }

    /// Applies a partial edit to an asset under a location the caller
    /// owns.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityServiceError`] when the caller is not the owning
    /// admin, the asset or its location does not exist, the edit is
    /// invalid, or persistence fails.
    pub async fn update_asset(
        &self,
        identity: &Identity,
        asset_id: AssetId,
        edit: AssetEdit,
    ) -> FacilityServiceResult<Asset> {
        identity.require_admin("update asset")?;
        let mut asset = self.owned_asset(identity, asset_id).await?;
        asset.apply_edit(edit, &*self.clock)?;
        self.assets.update(&asset).await?;
        Ok(asset)
    }

    /// Deletes an asset individually.
    ///
    /// Tasks under the asset are left in place; they become dangling
    /// references that read paths resolve with sentinel names.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityServiceError`] when the caller is not the owning
    /// admin, the asset or its location does not exist, or persistence
    /// fails.
    pub async fn delete_asset(
        &self,
        identity: &Identity,
        asset_id: AssetId,
    ) -> FacilityServiceResult<()> {
        identity.require_admin("delete asset")?;
        let asset = self.owned_asset(identity, asset_id).await?;
        self.assets.delete(asset.id()).await?;
        Ok(())
    }

    async fn owned_location(
        &self,
        identity: &Identity,
        location_id: LocationId,
    ) -> FacilityServiceResult<Location> {
        let location = self
            .locations
            .find_by_id(location_id)
            .await?
            .ok_or(FacilityServiceError::LocationNotFound(location_id))?;
        if location.owner() != identity.uid() {
            return Err(PermissionError::NotOwner {
                resource: "location",
                id: location_id.to_string(),
            }
            .into());
        }
        Ok(location)
    }

    async fn owned_asset(
        &self,
        identity: &Identity,
        asset_id: AssetId,
    ) -> FacilityServiceResult<Asset> {
        let asset = self
            .assets
            .find_by_id(asset_id)
            .await?
            .ok_or(FacilityServiceError::AssetNotFound(asset_id))?;
        self.owned_location(identity, asset.location_id()).await?;
        Ok(asset)
    }

    /// Deletes one asset and its tasks, recording failures instead of
    /// propagating them.
    async fn cascade_asset(&self, asset: &Asset, report: &mut CascadeReport) {
        match self.tasks.list_by_asset(asset.id()).await {
            Ok(tasks) => {
                for task in tasks {
                    match self.tasks.delete(task.id()).await {
                        Ok(()) => report.deleted_tasks += 1,
                        Err(err) => report.failures.push(CascadeFailure {
                            stage: CascadeStage::TaskDelete,
                            id: task.id().to_string(),
                            reason: err.to_string(),
                        }),
                    }
                }
            }
            Err(err) => report.failures.push(CascadeFailure {
                stage: CascadeStage::TaskQuery,
                id: asset.id().to_string(),
                reason: err.to_string(),
            }),
        }

        match self.assets.delete(asset.id()).await {
            Ok(()) => report.deleted_assets += 1,
            Err(err) => report.failures.push(CascadeFailure {
                stage: CascadeStage::AssetDelete,
                id: asset.id().to_string(),
                reason: err.to_string(),
            }),
        }
    }
}
