//! In-memory credential provider with salted password digests.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::identity::{
    domain::{EmailAddress, Password, UserId},
    ports::{CredentialError, CredentialResult, IdentityProvider, Session},
};

/// Thread-safe in-memory credential provider.
///
/// Passwords are stored as salted SHA-256 digests, never as plaintext. A
/// single current-session slot models the signed-in user.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityProvider {
    state: Arc<RwLock<ProviderState>>,
}

#[derive(Debug, Default)]
struct ProviderState {
    credentials: HashMap<EmailAddress, CredentialRecord>,
    session: Option<Session>,
}

#[derive(Debug)]
struct CredentialRecord {
    uid: UserId,
    salt: [u8; 16],
    digest: [u8; 32],
}

impl CredentialRecord {
    fn matches(&self, password: &Password) -> bool {
        digest_password(&self.salt, password) == self.digest
    }
}

fn digest_password(salt: &[u8; 16], password: &Password) -> [u8; 32] {
    Sha256::new()
        .chain_update(salt)
        .chain_update(password.expose().as_bytes())
        .finalize()
        .into()
}

impl InMemoryIdentityProvider {
    /// Creates an empty provider with no registered credentials.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn register(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> CredentialResult<UserId> {
        let mut state = self
            .state
            .write()
            .map_err(|err| CredentialError::provider(std::io::Error::other(err.to_string())))?;
        if state.credentials.contains_key(email) {
            return Err(CredentialError::EmailAlreadyRegistered(email.clone()));
        }

        let uid = UserId::new();
        let salt: [u8; 16] = Uuid::new_v4().into_bytes();
        let record = CredentialRecord {
            uid,
            salt,
            digest: digest_password(&salt, password),
        };
        state.credentials.insert(email.clone(), record);
        state.session = Some(Session {
            uid,
            email: email.clone(),
        });
        Ok(uid)
    }

    async fn authenticate(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> CredentialResult<UserId> {
        let mut state = self
            .state
            .write()
            .map_err(|err| CredentialError::provider(std::io::Error::other(err.to_string())))?;
        let record = state
            .credentials
            .get(email)
            .ok_or_else(|| CredentialError::UnknownEmail(email.clone()))?;
        if !record.matches(password) {
            return Err(CredentialError::IncorrectPassword);
        }

        let uid = record.uid;
        state.session = Some(Session {
            uid,
            email: email.clone(),
        });
        Ok(uid)
    }

    async fn sign_out(&self) -> CredentialResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| CredentialError::provider(std::io::Error::other(err.to_string())))?;
        state.session = None;
        Ok(())
    }

    async fn current_session(&self) -> CredentialResult<Option<Session>> {
        let state = self
            .state
            .read()
            .map_err(|err| CredentialError::provider(std::io::Error::other(err.to_string())))?;
        Ok(state.session.clone())
    }
}
