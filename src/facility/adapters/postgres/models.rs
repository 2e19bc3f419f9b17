//! Diesel row models for facility persistence.

use super::schema::{assets, locations};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for location records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LocationRow {
    /// Location identifier.
    pub id: uuid::Uuid,
    /// Owning admin's user identifier.
    pub owner_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Free-form description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last edit timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for location records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = locations)]
pub struct NewLocationRow {
    /// Location identifier.
    pub id: uuid::Uuid,
    /// Owning admin's user identifier.
    pub owner_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Free-form description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last edit timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for asset records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = assets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssetRow {
    /// Asset identifier.
    pub id: uuid::Uuid,
    /// Parent location identifier.
    pub location_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last edit timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for asset records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = assets)]
pub struct NewAssetRow {
    /// Asset identifier.
    pub id: uuid::Uuid,
    /// Parent location identifier.
    pub location_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last edit timestamp.
    pub updated_at: DateTime<Utc>,
}
