//! Read-side resolver for role-scoped task and facility visibility.
//!
//! Pure query shaping: nothing here mutates. Admins see their own
//! locations and everything beneath them; workers see only the tasks
//! currently assigned to their email that are awaiting completion.

use crate::facility::{
    domain::{Asset, AssetId, Location, LocationId},
    ports::{
        AssetRepository, AssetRepositoryError, LocationRepository, LocationRepositoryError,
    },
};
use crate::identity::domain::{Identity, PermissionError};
use crate::task::{
    domain::{Task, TaskState},
    ports::{TaskRepository, TaskRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Sentinel asset name rendered for a dangling asset reference.
pub const UNKNOWN_ASSET: &str = "Unknown Asset";

/// Sentinel location name rendered for a dangling location reference.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// A task denormalized with its asset and location names for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    /// The task itself.
    pub task: Task,
    /// Parent asset name, or [`UNKNOWN_ASSET`] when the reference
    /// dangles.
    pub asset_name: String,
    /// Parent location name, or [`UNKNOWN_LOCATION`] when the reference
    /// dangles.
    pub location_name: String,
}

/// Service-level errors for visibility queries.
#[derive(Debug, Error)]
pub enum VisibilityError {
    /// The caller lacks the role or ownership for the query.
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

/// Result type for visibility queries.
pub type VisibilityResult<T> = Result<T, VisibilityError>;

/// Role-scoped read service over locations, assets, and tasks.
#[derive(Clone)]
pub struct VisibilityService<L, A, T>
where
    L: LocationRepository,
    A: AssetRepository,
    T: TaskRepository,
{
    locations: Arc<L>,
    assets: Arc<A>,
    tasks: Arc<T>,
}

impl<L, A, T> VisibilityService<L, A, T>
where
    L: LocationRepository,
    A: AssetRepository,
    T: TaskRepository,
{
    /// Creates a new visibility service.
    #[must_use]
    pub const fn new(locations: Arc<L>, assets: Arc<A>, tasks: Arc<T>) -> Self {
        Self {
            locations,
            assets,
            tasks,
        }
    }

    /// Returns the locations the calling admin owns.
    ///
    /// Other admins' locations are never included.
    ///
    /// # Errors
    ///
    /// Returns [`VisibilityError`] when the caller is not an admin or the
    /// read fails.
    pub async fn locations_for(&self, identity: &Identity) -> VisibilityResult<Vec<Location>> {
        identity.require_admin("list locations")?;
        Ok(self.locations.list_by_owner(identity.uid()).await?)
    }

    /// Returns the assets under a location the calling admin owns.
    ///
    /// # Errors
    ///
    /// Returns [`VisibilityError`] when the caller is not the owning admin,
    /// the location does not exist, or the read fails.
    pub async fn assets_in(
        &self,
        identity: &Identity,
        location_id: LocationId,
    ) -> VisibilityResult<Vec<Asset>> {
        identity.require_admin("list assets")?;
        let location = self.owned_location(identity, location_id).await?;
        Ok(self.assets.list_by_location(location.id()).await?)
    }

    /// Returns the tasks under an asset the calling admin owns.
    ///
    /// # Errors
    ///
    /// Returns [`VisibilityError`] when the caller is not the owning admin,
    /// the asset or its location does not exist, or the read fails.
    pub async fn tasks_on(
        &self,
        identity: &Identity,
        asset_id: AssetId,
    ) -> VisibilityResult<Vec<Task>> {
        identity.require_admin("list tasks")?;
        let asset = self
            .assets
            .find_by_id(asset_id)
            .await?
            .ok_or(VisibilityError::AssetNotFound(asset_id))?;
        self.owned_location(identity, asset.location_id()).await?;
        Ok(self.tasks.list_by_asset(asset.id()).await?)
    }

    /// Returns every task under every location the calling admin owns,
    /// denormalized for display.
    ///
    /// # Errors
    ///
    /// Returns [`VisibilityError`] when the caller is not an admin or a
    /// read fails.
    pub async fn task_overview(&self, identity: &Identity) -> VisibilityResult<Vec<TaskView>> {
        identity.require_admin("task overview")?;
        let mut views = Vec::new();
        for location in self.locations.list_by_owner(identity.uid()).await? {
            for asset in self.assets.list_by_location(location.id()).await? {
                for task in self.tasks.list_by_asset(asset.id()).await? {
                    views.push(TaskView {
                        task,
                        asset_name: asset.name().to_owned(),
                        location_name: location.name().to_owned(),
                    });
                }
            }
        }
        Ok(views)
    }

    /// Returns the calling worker's actionable tasks, denormalized for
    /// display.
    ///
    /// Actionable means currently assigned to the worker's email and
    /// awaiting completion: a completed task drops out of this list until
    /// it is reassigned. Unassigned tasks are never visible to any worker.
    /// Dangling asset or location references resolve to sentinel names
    /// rather than failing the read.
    ///
    /// # Errors
    ///
    /// Returns [`VisibilityError`] when the caller is not a worker or the
    /// read fails.
    pub async fn actionable_tasks(&self, identity: &Identity) -> VisibilityResult<Vec<TaskView>> {
        identity.require_worker("list assigned tasks")?;
        let assigned = self.tasks.list_by_assignee(identity.email()).await?;

        let mut views = Vec::new();
        for task in assigned {
            if task.state() != TaskState::Assigned {
                continue;
            }
            let (asset_name, location_name) = self.display_names(task.asset_id()).await?;
            views.push(TaskView {
                task,
                asset_name,
                location_name,
            });
        }
        Ok(views)
    }

    /// Resolves display names for a task's asset and location, falling
    /// back to sentinels on dangling references.
    async fn display_names(&self, asset_id: AssetId) -> VisibilityResult<(String, String)> {
        let Some(asset) = self.assets.find_by_id(asset_id).await? else {
            return Ok((UNKNOWN_ASSET.to_owned(), UNKNOWN_LOCATION.to_owned()));
        };
        let location_name = self
            .locations
            .find_by_id(asset.location_id())
            .await?
            .map_or_else(
                || UNKNOWN_LOCATION.to_owned(),
                |location| location.name().to_owned(),
            );
        Ok((asset.name().to_owned(), location_name))
    }

    async fn owned_location(
        &self,
        identity: &Identity,
        location_id: LocationId,
    ) -> VisibilityResult<Location> {
        let location = self
            .locations
            .find_by_id(location_id)
            .await?
            .ok_or(VisibilityError::LocationNotFound(location_id))?;
        if location.owner() != identity.uid() {
            return Err(PermissionError::NotOwner {
                resource: "location",
                id: location_id.to_string(),
            }
            .into());
        }
        Ok(location)
    }
}
