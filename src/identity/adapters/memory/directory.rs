//! In-memory user directory keyed by uid with an email index.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{EmailAddress, UserAccount, UserId},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    accounts: HashMap<UserId, UserAccount>,
    email_index: HashMap<EmailAddress, UserId>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn store(&self, account: &UserAccount) -> UserDirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.accounts.contains_key(&account.uid()) {
            return Err(UserDirectoryError::DuplicateAccount(account.uid()));
        }

        state
            .email_index
            .insert(account.email().clone(), account.uid());
        state.accounts.insert(account.uid(), account.clone());
        Ok(())
    }

    async fn find_by_uid(&self, uid: UserId) -> UserDirectoryResult<Option<UserAccount>> {
        let state = self.state.read().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.accounts.get(&uid).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> UserDirectoryResult<Option<UserAccount>> {
        let state = self.state.read().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let account = state
            .email_index
            .get(email)
            .and_then(|uid| state.accounts.get(uid))
            .cloned();
        Ok(account)
    }
}
