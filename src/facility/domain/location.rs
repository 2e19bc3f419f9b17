//! Location aggregate root.

use super::{FacilityDomainError, LocationId};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A physical site containing assets, owned by the admin that created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    id: LocationId,
    owner: UserId,
    name: String,
    address: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedLocationData {
    /// Persisted location identifier.
    pub id: LocationId,
    /// Persisted owner identifier.
    pub owner: UserId,
    /// Persisted display name.
    pub name: String,
    /// Persisted street address.
    pub address: String,
    /// Persisted free-form description.
    pub description: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest edit timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied to an existing location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationEdit {
    name: Option<String>,
    address: Option<String>,
    description: Option<String>,
}

impl LocationEdit {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the street address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Location {
    /// Creates a new location owned by the given admin.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityDomainError::EmptyLocationName`] when the name is
    /// blank.
    pub fn new(
        owner: UserId,
        name: impl Into<String>,
        address: impl Into<String>,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, FacilityDomainError> {
        let name = validated_name(name)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: LocationId::new(),
            owner,
            name,
            address: address.into(),
            description: description.into(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a location from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedLocationData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            name: data.name,
            address: data.address,
            description: data.description,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the location identifier.
    #[must_use]
    pub const fn id(&self) -> LocationId {
        self.id
    }

    /// Returns the owning admin's user identifier.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the street address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest edit timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial edit to name, address, or description.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityDomainError::EmptyLocationName`] when the edit
    /// replaces the name with a blank value.
    pub fn apply_edit(
        &mut self,
        edit: LocationEdit,
        clock: &impl Clock,
    ) -> Result<(), FacilityDomainError> {
        if let Some(name) = edit.name {
            self.name = validated_name(name)?;
        }
        if let Some(address) = edit.address {
            self.address = address;
        }
        if let Some(description) = edit.description {
            self.description = description;
        }
        self.updated_at = clock.utc();
        Ok(())
    }
}

fn validated_name(name: impl Into<String>) -> Result<String, FacilityDomainError> {
    let raw = name.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FacilityDomainError::EmptyLocationName);
    }
    Ok(trimmed.to_owned())
}
