//! Error types for task domain validation and parsing.

use super::{TaskId, TaskState};
use thiserror::Error;

/// Errors returned while constructing and mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// A checklist item is empty after trimming.
    #[error("checklist items must not be empty")]
    EmptyChecklistItem,

    /// A checked-off item does not appear on the task's checklist.
    #[error("checked item '{0}' is not on the task checklist")]
    UnknownCheckedItem(String),

    /// The task has no open completion cycle.
    #[error("task {task} is not awaiting completion (state: {state})")]
    NotAwaitingCompletion {
        /// The task that rejected the completion.
        task: TaskId,
        /// Its lifecycle state at the time.
        state: TaskState,
    },

    /// The evidence MIME type is not an image type.
    #[error("evidence must be an image, got MIME type '{0}'")]
    InvalidEvidenceMime(String),

    /// The evidence payload is not a well-formed base64 data URL.
    #[error("evidence payload is not a valid base64 data URL")]
    InvalidEvidencePayload,
}

/// Error returned while parsing task states from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state: {0}")]
pub struct ParseTaskStateError(pub String);
