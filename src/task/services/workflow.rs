//! Service layer for the task lifecycle: create, edit, assign, complete.

use crate::facility::{
    domain::AssetId,
    ports::{AssetRepository, AssetRepositoryError},
};
use crate::identity::domain::{EmailAddress, Identity, IdentityDomainError, PermissionError};
use crate::task::{
    domain::{
        Checklist, CompletionRecord, PhotoEvidence, Task, TaskDomainError, TaskEdit, TaskId,
    },
    ports::{
        CompletionLog, CompletionLogError, TaskRepository, TaskRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task under an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    asset_id: AssetId,
    name: String,
    description: String,
    checklist: Vec<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required parent asset and name.
    #[must_use]
    pub fn new(asset_id: AssetId, name: impl Into<String>) -> Self {
        Self {
            asset_id,
            name: name.into(),
            description: String::new(),
            checklist: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the ordered checklist steps.
    #[must_use]
    pub fn with_checklist(mut self, items: impl IntoIterator<Item = String>) -> Self {
        self.checklist = items.into_iter().collect();
        self
    }
}

/// Request payload for completing an assigned task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteTaskRequest {
    task_id: TaskId,
    checked_items: Vec<String>,
    evidence: Option<PhotoEvidence>,
}

impl CompleteTaskRequest {
    /// Creates a request with no items checked and no evidence.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            checked_items: Vec::new(),
            evidence: None,
        }
    }

    /// Sets the checked-off steps.
    #[must_use]
    pub fn with_checked_items(mut self, items: impl IntoIterator<Item = String>) -> Self {
        self.checked_items = items.into_iter().collect();
        self
    }

    /// Attaches photo evidence.
    #[must_use]
    pub fn with_evidence(mut self, evidence: PhotoEvidence) -> Self {
        self.evidence = Some(evidence);
        self
    }
}

/// Service-level errors for task workflow operations.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The assignee email failed validation.
    #[error(transparent)]
    Assignee(#[from] IdentityDomainError),
    /// The caller lacks the role or assignment for the operation.
    #[error(transparent)]
    Permission(#[from] PermissionError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Completion log operation failed.
    #[error(transparent)]
    History(#[from] CompletionLogError),
    /// Asset repository operation failed.
    #[error(transparent)]
    AssetRepository(#[from] AssetRepositoryError),
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The referenced asset does not exist.
    #[error("asset not found: {0}")]
    AssetNotFound(AssetId),
}

/// Result type for task workflow operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Task lifecycle orchestration service.
///
/// Owns the assignment and completion protocol. On completion the history
/// record is appended before the task is rewritten, so a task can never
/// show a completion that has no audit entry.
#[derive(Clone)]
pub struct TaskWorkflowService<T, H, A, C>
where
    T: TaskRepository,
    H: CompletionLog,
    A: AssetRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    history: Arc<H>,
    assets: Arc<A>,
    clock: Arc<C>,
}

impl<T, H, A, C> TaskWorkflowService<T, H, A, C>
where
    T: TaskRepository,
    H: CompletionLog,
    A: AssetRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task workflow service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, history: Arc<H>, assets: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            history,
            assets,
            clock,
        }
    }

    /// Creates an unassigned task under an existing asset.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError`] when the caller is not an admin, the
    /// asset does not exist, the name or a checklist item is blank, or
    /// persistence fails.
    pub async fn create_task(
        &self,
        identity: &Identity,
        request: CreateTaskRequest,
    ) -> TaskWorkflowResult<Task> {
        identity.require_admin("create task")?;
        let asset = self
            .assets
            .find_by_id(request.asset_id)
            .await?
            .ok_or(TaskWorkflowError::AssetNotFound(request.asset_id))?;

        let checklist = Checklist::new(request.checklist)?;
        let task = Task::new(
            asset.id(),
            request.name,
            request.description,
            checklist,
            &*self.clock,
        )?;
        self.tasks.store(&task).await?;
        tracing::info!(task = %task.id(), asset = %asset.id(), "task created");
        Ok(task)
    }

    /// Applies a partial edit to a task's name or description.
    ///
    /// Checklist, assignment, and completion fields are not editable
    /// through this path.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError`] when the caller is not an admin, the
    /// task does not exist, the edit is invalid, or persistence fails.
    pub async fn update_task(
        &self,
        identity: &Identity,
        task_id: TaskId,
        edit: TaskEdit,
    ) -> TaskWorkflowResult<Task> {
        identity.require_admin("update task")?;
        let mut task = self.existing_task(task_id).await?;
        task.apply_edit(edit, &*self.clock)?;
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Deletes a task irreversibly.
    ///
    /// Completion history for the task is untouched and remains the
    /// permanent record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError`] when the caller is not an admin, the
    /// task does not exist, or persistence fails.
    pub async fn delete_task(&self, identity: &Identity, task_id: TaskId) -> TaskWorkflowResult<()> {
        identity.require_admin("delete task")?;
        self.tasks
            .delete(task_id)
            .await
            .map_err(|err| match err {
                TaskRepositoryError::NotFound(id) => TaskWorkflowError::TaskNotFound(id),
                other => other.into(),
            })?;
        tracing::info!(task = %task_id, "task deleted");
        Ok(())
    }

    /// Assigns a task to a worker email, opening a completion cycle.
    ///
    /// Applies regardless of prior state and overwrites any previous
    /// assignee without trace. The address is shape-validated only; no
    /// check is made that it belongs to a registered worker.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError`] when the caller is not an admin, the
    /// task does not exist, the email is malformed, or persistence fails.
    pub async fn assign_task(
        &self,
        identity: &Identity,
        task_id: TaskId,
        assignee: &str,
    ) -> TaskWorkflowResult<Task> {
        identity.require_admin("assign task")?;
        let address = EmailAddress::new(assignee)?;
        let mut task = self.existing_task(task_id).await?;
        task.assign(address, &*self.clock);
        self.tasks.update(&task).await?;
        tracing::info!(task = %task_id, "task assigned");
        Ok(task)
    }

    /// Completes an assigned task as the calling worker.
    ///
    /// Only the current assignee may complete, and only while the task is
    /// awaiting completion. A partial or empty check-off is accepted. The
    /// history record is written first; if that append fails the task is
    /// left untouched and the error surfaces.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError`] when the caller is not the assigned
    /// worker, the task does not exist or has no open cycle, a checked
    /// item is not on the checklist, or either write fails.
    pub async fn complete_task(
        &self,
        identity: &Identity,
        request: CompleteTaskRequest,
    ) -> TaskWorkflowResult<(Task, CompletionRecord)> {
        identity.require_worker("complete task")?;
        let mut task = self.existing_task(request.task_id).await?;
        if !task.is_assigned_to(identity.email()) {
            return Err(PermissionError::NotAssignee {
                task: task.id().to_string(),
            }
            .into());
        }

        let snapshot = task.complete(&request.checked_items, request.evidence, &*self.clock)?;
        let record = CompletionRecord::new(&task, identity.email().clone(), &snapshot);

        self.history.append(&record).await?;
        self.tasks.update(&task).await?;

        tracing::info!(task = %task.id(), record = %record.id(), "task completed");
        Ok((task, record))
    }

    /// Returns the completion history for a task, oldest first.
    ///
    /// Entries survive task deletion, so this works for task identifiers
    /// that no longer resolve.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::History`] when the log read fails.
    pub async fn completion_history(
        &self,
        task_id: TaskId,
    ) -> TaskWorkflowResult<Vec<CompletionRecord>> {
        Ok(self.history.list_for_task(task_id).await?)
    }

    async fn existing_task(&self, task_id: TaskId) -> TaskWorkflowResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskWorkflowError::TaskNotFound(task_id))
    }
}
