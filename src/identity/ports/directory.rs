//! Directory port for the stored `users` role records.

use crate::identity::domain::{EmailAddress, UserAccount, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Persistence contract for user role records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Stores a new user record.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::DuplicateAccount`] when a record for
    /// the uid already exists.
    async fn store(&self, account: &UserAccount) -> UserDirectoryResult<()>;

    /// Finds a record by user identifier.
    ///
    /// Returns `None` when no record exists.
    async fn find_by_uid(&self, uid: UserId) -> UserDirectoryResult<Option<UserAccount>>;

    /// Finds a record by email address.
    ///
    /// Returns `None` when no record exists.
    async fn find_by_email(&self, email: &EmailAddress)
    -> UserDirectoryResult<Option<UserAccount>>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// A record with the same uid already exists.
    #[error("duplicate user record: {0}")]
    DuplicateAccount(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
