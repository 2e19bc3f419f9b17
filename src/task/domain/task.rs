//! Task aggregate root and lifecycle states.

use super::{Checklist, ParseTaskStateError, PhotoEvidence, TaskDomainError, TaskId};
use crate::facility::domain::AssetId;
use crate::identity::domain::EmailAddress;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle state.
///
/// Completion does not terminate a task: a completed task transitions back
/// to [`TaskState::Assigned`] the next time an admin assigns it, opening a
/// new cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Created, not yet assigned to any worker.
    Unassigned,
    /// Assigned to a worker and awaiting completion.
    Assigned,
    /// Completed for the current cycle; reassignment reopens it.
    Completed,
}

impl TaskState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unassigned => "unassigned",
            Self::Assigned => "assigned",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TaskState {
    type Error = ParseTaskStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "unassigned" => Ok(Self::Unassigned),
            "assigned" => Ok(Self::Assigned),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStateError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Denormalized snapshot of the most recent completion.
///
/// Kept on the task for quick display; the append-only history log is the
/// source of truth and the two are always written together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSnapshot {
    /// When the completion was recorded.
    pub completed_at: DateTime<Utc>,
    /// Checked-off steps, in checklist order.
    pub checked_items: Vec<String>,
    /// Photo evidence, if any was attached.
    pub evidence: Option<PhotoEvidence>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    asset_id: AssetId,
    name: String,
    description: String,
    checklist: Checklist,
    assigned_to: Option<EmailAddress>,
    state: TaskState,
    last_completion: Option<CompletionSnapshot>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted parent asset identifier.
    pub asset_id: AssetId,
    /// Persisted display name.
    pub name: String,
    /// Persisted free-form description.
    pub description: String,
    /// Persisted checklist.
    pub checklist: Checklist,
    /// Persisted assignee, if any.
    pub assigned_to: Option<EmailAddress>,
    /// Persisted lifecycle state.
    pub state: TaskState,
    /// Persisted latest completion snapshot, if any.
    pub last_completion: Option<CompletionSnapshot>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied to an existing task.
///
/// Edits touch name and description only; checklist, assignment, and
/// completion fields are never edited through this path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    name: Option<String>,
    description: Option<String>,
}

impl TaskEdit {
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

impl Task {
    /// Creates a new unassigned task under the given asset.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] when the name is blank.
    pub fn new(
        asset_id: AssetId,
        name: impl Into<String>,
        description: impl Into<String>,
        checklist: Checklist,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let name = validated_name(name)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            asset_id,
            name,
            description: description.into(),
            checklist,
            assigned_to: None,
            state: TaskState::Unassigned,
            last_completion: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            asset_id: data.asset_id,
            name: data.name,
            description: data.description,
            checklist: data.checklist,
            assigned_to: data.assigned_to,
            state: data.state,
            last_completion: data.last_completion,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the parent asset identifier.
    #[must_use]
    pub const fn asset_id(&self) -> AssetId {
        self.asset_id
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

    /// Returns the checklist.
    #[must_use]
    pub const fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    /// Returns the current assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<&EmailAddress> {
        self.assigned_to.as_ref()
    }

    /// Returns the task lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Returns the latest completion snapshot, if any.
    #[must_use]
    pub const fn last_completion(&self) -> Option<&CompletionSnapshot> {
        self.last_completion.as_ref()
    }

    /// Returns when the task was last completed, if ever.
    #[must_use]
    pub fn last_completed_at(&self) -> Option<DateTime<Utc>> {
        self.last_completion
            .as_ref()
            .map(|snapshot| snapshot.completed_at)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the task is currently assigned to the given address.
    #[must_use]
    pub fn is_assigned_to(&self, email: &EmailAddress) -> bool {
        self.assigned_to.as_ref() == Some(email)
    }

    /// Applies a partial edit to name or description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] when the edit replaces
    /// the name with a blank value.
    pub fn apply_edit(
        &mut self,
        edit: TaskEdit,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if let Some(name) = edit.name {
            self.name = validated_name(name)?;
        }
        if let Some(description) = edit.description {
            self.description = description;
        }
        self.touch(clock);
        Ok(())
    }

    /// Assigns the task to a worker, opening a completion cycle.
    ///
    /// Applies regardless of prior state: an unassigned task becomes
    /// actionable, a completed task is re-triggered, and re-assignment
    /// overwrites the previous assignee without trace.
    pub fn assign(&mut self, assignee: EmailAddress, clock: &impl Clock) {
        self.assigned_to = Some(assignee);
        self.state = TaskState::Assigned;
        self.touch(clock);
    }

    /// Closes the current cycle with the checked-off steps and evidence.
    ///
    /// A partial — even empty — check-off is accepted: completion is a
    /// timestamped event, not a pass/fail gate. The assignee is retained
    /// for the next cycle.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAwaitingCompletion`] when the task is
    /// not in the [`TaskState::Assigned`] state, or
    /// [`TaskDomainError::UnknownCheckedItem`] when a checked item is not
    /// on the checklist.
    pub fn complete(
        &mut self,
        checked_items: &[String],
        evidence: Option<PhotoEvidence>,
        clock: &impl Clock,
    ) -> Result<CompletionSnapshot, TaskDomainError> {
        if self.state != TaskState::Assigned {
            return Err(TaskDomainError::NotAwaitingCompletion {
                task: self.id,
                state: self.state,
            });
        }
        for item in checked_items {
            if !self.checklist.contains(item) {
                return Err(TaskDomainError::UnknownCheckedItem(item.clone()));
            }
        }

        let snapshot = CompletionSnapshot {
            completed_at: clock.utc(),
            checked_items: self.checklist.ordered_subset(checked_items),
            evidence,
        };
        self.last_completion = Some(snapshot.clone());
        self.state = TaskState::Completed;
        self.updated_at = snapshot.completed_at;
        Ok(snapshot)
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validated_name(name: impl Into<String>) -> Result<String, TaskDomainError> {
    let raw = name.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTaskName);
    }
    Ok(trimmed.to_owned())
}
