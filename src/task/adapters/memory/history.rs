//! In-memory completion log.
//!
//! Holds records in a plain append vector; nothing in the adapter can
//! rewrite an entry once pushed.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{CompletionRecord, TaskId},
    ports::{CompletionLog, CompletionLogError, CompletionLogResult},
};

/// Thread-safe in-memory completion log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCompletionLog {
    state: Arc<RwLock<Vec<CompletionRecord>>>,
}

impl InMemoryCompletionLog {
    /// Creates an empty in-memory log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompletionLog for InMemoryCompletionLog {
    async fn append(&self, record: &CompletionRecord) -> CompletionLogResult<()> {
        let mut records = self.state.write().map_err(|err| {
            CompletionLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if records.iter().any(|existing| existing.id() == record.id()) {
            return Err(CompletionLogError::DuplicateRecord(record.id()));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn list_for_task(&self, task: TaskId) -> CompletionLogResult<Vec<CompletionRecord>> {
        let records = self.state.read().map_err(|err| {
            CompletionLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut entries: Vec<CompletionRecord> = records
            .iter()
            .filter(|record| record.task_id() == task)
            .cloned()
            .collect();
        // Stable sort keeps append order for identical timestamps.
        entries.sort_by(|a, b| a.completed_at().cmp(&b.completed_at()));
        Ok(entries)
    }
}
