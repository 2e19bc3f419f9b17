//! Immutable completion history records.

use super::{CompletionId, CompletionSnapshot, PhotoEvidence, Task, TaskId};
use crate::identity::domain::EmailAddress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit record of one completion event.
///
/// Records are append-only: once written they are never updated or
/// deleted, and they survive deletion of the task itself. The task name is
/// denormalized in so the record stays readable after the task is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    id: CompletionId,
    task_id: TaskId,
    task_name: String,
    completed_by: EmailAddress,
    completed_at: DateTime<Utc>,
    checked_items: Vec<String>,
    evidence: Option<PhotoEvidence>,
}

/// Parameter object for reconstructing a persisted completion record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCompletionData {
    /// Persisted record identifier.
    pub id: CompletionId,
    /// Persisted task identifier.
    pub task_id: TaskId,
    /// Persisted task name at completion time.
    pub task_name: String,
    /// Persisted completing worker's email.
    pub completed_by: EmailAddress,
    /// Persisted completion timestamp.
    pub completed_at: DateTime<Utc>,
    /// Persisted checked-off steps.
    pub checked_items: Vec<String>,
    /// Persisted photo evidence, if any.
    pub evidence: Option<PhotoEvidence>,
}

impl CompletionRecord {
    /// Creates a record from a task's freshly produced completion
    /// snapshot.
    #[must_use]
    pub fn new(task: &Task, completed_by: EmailAddress, snapshot: &CompletionSnapshot) -> Self {
        Self {
            id: CompletionId::new(),
            task_id: task.id(),
            task_name: task.name().to_owned(),
            completed_by,
            completed_at: snapshot.completed_at,
            checked_items: snapshot.checked_items.clone(),
            evidence: snapshot.evidence.clone(),
        }
    }

    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCompletionData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            task_name: data.task_name,
            completed_by: data.completed_by,
            completed_at: data.completed_at,
            checked_items: data.checked_items,
            evidence: data.evidence,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> CompletionId {
        self.id
    }

    /// Returns the completed task's identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the task name at completion time.
    #[must_use]
    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    /// Returns the completing worker's email.
    #[must_use]
    pub const fn completed_by(&self) -> &EmailAddress {
        &self.completed_by
    }

    /// Returns the completion timestamp.
    #[must_use]
    pub const fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Returns the checked-off steps, in checklist order.
    #[must_use]
    pub fn checked_items(&self) -> &[String] {
        &self.checked_items
    }

    /// Returns the attached photo evidence, if any.
    #[must_use]
    pub const fn evidence(&self) -> Option<&PhotoEvidence> {
        self.evidence.as_ref()
    }
}
