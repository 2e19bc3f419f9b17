//! In-memory location repository with a broadcast change feed.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

use crate::facility::{
    domain::{Location, LocationId},
    ports::{
        LocationEvent, LocationRepository, LocationRepositoryError, LocationRepositoryResult,
        LocationWatch,
    },
};
use crate::identity::domain::UserId;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Thread-safe in-memory location repository.
///
/// Implements [`LocationWatch`]: every successful mutation is broadcast to
/// subscribers, which is how the admin location list stays live.
#[derive(Debug, Clone)]
pub struct InMemoryLocationRepository {
    state: Arc<RwLock<LocationState>>,
    events: broadcast::Sender<LocationEvent>,
}

#[derive(Debug, Default)]
struct LocationState {
    locations: HashMap<LocationId, Location>,
}

impl InMemoryLocationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(LocationState::default())),
            events,
        }
    }

    fn publish(&self, event: LocationEvent) {
        // A send error only means nobody is subscribed right now.
        drop(self.events.send(event));
    }
}

impl Default for InMemoryLocationRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationWatch for InMemoryLocationRepository {
    fn subscribe(&self) -> broadcast::Receiver<LocationEvent> {
        self.events.subscribe()
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn store(&self, location: &Location) -> LocationRepositoryResult<()> {
        {
            let mut state = self.state.write().map_err(|err| {
                LocationRepositoryError::persistence(std::io::Error::other(err.to_string()))
            })?;
            if state.locations.contains_key(&location.id()) {
                return Err(LocationRepositoryError::DuplicateLocation(location.id()));
            }
            state.locations.insert(location.id(), location.clone());
        }
        self.publish(LocationEvent::Created(location.clone()));
        Ok(())
    }

    async fn update(&self, location: &Location) -> LocationRepositoryResult<()> {
        {
            let mut state = self.state.write().map_err(|err| {
                LocationRepositoryError::persistence(std::io::Error::other(err.to_string()))
            })?;
            if !state.locations.contains_key(&location.id()) {
                return Err(LocationRepositoryError::NotFound(location.id()));
            }
            state.locations.insert(location.id(), location.clone());
        }
        self.publish(LocationEvent::Updated(location.clone()));
        Ok(())
    }

    async fn delete(&self, id: LocationId) -> LocationRepositoryResult<()> {
        {
            let mut state = self.state.write().map_err(|err| {
                LocationRepositoryError::persistence(std::io::Error::other(err.to_string()))
            })?;
            if state.locations.remove(&id).is_none() {
                return Err(LocationRepositoryError::NotFound(id));
            }
        }
        self.publish(LocationEvent::Deleted(id));
        Ok(())
    }

    async fn find_by_id(&self, id: LocationId) -> LocationRepositoryResult<Option<Location>> {
        let state = self.state.read().map_err(|err| {
            LocationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.locations.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner: UserId) -> LocationRepositoryResult<Vec<Location>> {
        let state = self.state.read().map_err(|err| {
            LocationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut owned: Vec<Location> = state
            .locations
            .values()
            .filter(|location| location.owner() == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.created_at().cmp(&b.created_at()));
        Ok(owned)
    }
}
