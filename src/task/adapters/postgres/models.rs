//! Diesel row models for task persistence.

use super::schema::{task_history, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Parent asset identifier.
    pub asset_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Ordered checklist items.
    pub checklist: Value,
    /// Current assignee email, if any.
    pub assigned_to: Option<String>,
    /// Lifecycle state.
    pub state: String,
    /// Latest completion snapshot, if any.
    pub last_completion: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Parent asset identifier.
    pub asset_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Ordered checklist items.
    pub checklist: Value,
    /// Current assignee email, if any.
    pub assigned_to: Option<String>,
    /// Lifecycle state.
    pub state: String,
    /// Latest completion snapshot, if any.
    pub last_completion: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for completion history records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CompletionRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Completed task's identifier.
    pub task_id: uuid::Uuid,
    /// Task name at completion time.
    pub task_name: String,
    /// Completing worker's email.
    pub completed_by: String,
    /// Completion timestamp.
    pub completed_at: DateTime<Utc>,
    /// Checked-off steps.
    pub checked_items: Value,
    /// Photo evidence data URL, if any.
    pub evidence: Option<String>,
}

/// Insert model for completion history records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_history)]
pub struct NewCompletionRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Completed task's identifier.
    pub task_id: uuid::Uuid,
    /// Task name at completion time.
    pub task_name: String,
    /// Completing worker's email.
    pub completed_by: String,
    /// Completion timestamp.
    pub completed_at: DateTime<Utc>,
    /// Checked-off steps.
    pub checked_items: Value,
    /// Photo evidence data URL, if any.
    pub evidence: Option<String>,
}
