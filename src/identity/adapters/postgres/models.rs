//! Diesel row models for user persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Credential-provider user identifier.
    pub id: uuid::Uuid,
    /// Login email address.
    pub email: String,
    /// Signup role.
    pub role: String,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Credential-provider user identifier.
    pub id: uuid::Uuid,
    /// Login email address.
    pub email: String,
    /// Signup role.
    pub role: String,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}
