//! Asset aggregate root.

use super::{AssetId, FacilityDomainError, LocationId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A piece of equipment at a location, the subject of maintenance tasks.
///
/// The parent location is fixed at creation; assets never move between
/// locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    id: AssetId,
    location_id: LocationId,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAssetData {
    /// Persisted asset identifier.
    pub id: AssetId,
    /// Persisted parent location identifier.
    pub location_id: LocationId,
    /// Persisted display name.
    pub name: String,
    /// Persisted free-form description.
    pub description: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest edit timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied to an existing asset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetEdit {
    name: Option<String>,
    description: Option<String>,
}

impl AssetEdit {
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

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Asset {
    /// Creates a new asset under the given location.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityDomainError::EmptyAssetName`] when the name is
    /// blank.
    pub fn new(
        location_id: LocationId,
        name: impl Into<String>,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, FacilityDomainError> {
        let name = validated_name(name)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: AssetId::new(),
            location_id,
            name,
            description: description.into(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an asset from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAssetData) -> Self {
        Self {
            id: data.id,
            location_id: data.location_id,
            name: data.name,
            description: data.description,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the asset identifier.
    #[must_use]
    pub const fn id(&self) -> AssetId {
        self.id
    }

    /// Returns the parent location identifier.
    #[must_use]
    pub const fn location_id(&self) -> LocationId {
        self.location_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
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

    /// Applies a partial edit to name or description.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityDomainError::EmptyAssetName`] when the edit
    /// replaces the name with a blank value.
    pub fn apply_edit(
        &mut self,
        edit: AssetEdit,
        clock: &impl Clock,
    ) -> Result<(), FacilityDomainError> {
        if let Some(name) = edit.name {
            self.name = validated_name(name)?;
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
        return Err(FacilityDomainError::EmptyAssetName);
    }
    Ok(trimmed.to_owned())
}
