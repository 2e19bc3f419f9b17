//! Append-only port for the completion history log.

use crate::task::domain::{CompletionId, CompletionRecord, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for completion log operations.
pub type CompletionLogResult<T> = Result<T, CompletionLogError>;

/// Persistence contract for the immutable completion audit trail.
///
/// The contract is deliberately append-only: there is no update or delete,
/// so prior entries cannot be altered through this port at all.
#[async_trait]
pub trait CompletionLog: Send + Sync {
    /// Appends one completion record.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionLogError::DuplicateRecord`] when a record with
    /// the same identifier already exists.
    async fn append(&self, record: &CompletionRecord) -> CompletionLogResult<()>;

    /// Returns all records for a task, ordered by completion time
    /// ascending.
    ///
    /// The result carries every entry; callers page in memory if they need
    /// to.
    async fn list_for_task(&self, task: TaskId) -> CompletionLogResult<Vec<CompletionRecord>>;
}

/// Errors returned by completion log implementations.
#[derive(Debug, Clone, Error)]
pub enum CompletionLogError {
    /// A record with the same identifier already exists.
    #[error("duplicate completion record: {0}")]
    DuplicateRecord(CompletionId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CompletionLogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
