//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod history;
pub mod repository;

pub use history::{CompletionLog, CompletionLogError, CompletionLogResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
