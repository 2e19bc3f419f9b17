//! Credential provider port for signup, sign-in, and session queries.

use crate::identity::domain::{EmailAddress, Password, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for credential provider operations.
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Signed-in principal reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Stable identifier issued at registration.
    pub uid: UserId,
    /// Login email address.
    pub email: EmailAddress,
}

/// Authentication contract.
///
/// The provider owns credentials and the ambient session; role data lives
/// in the [`crate::identity::ports::UserDirectory`] instead and is joined
/// by the auth service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Registers new credentials and signs the new user in.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::EmailAlreadyRegistered`] when the email is
    /// taken.
    async fn register(&self, email: &EmailAddress, password: &Password)
    -> CredentialResult<UserId>;

    /// Verifies credentials and signs the user in.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::UnknownEmail`] when no account exists for
    /// the address, or [`CredentialError::IncorrectPassword`] when the
    /// password does not match.
    async fn authenticate(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> CredentialResult<UserId>;

    /// Ends the current session, if any.
    async fn sign_out(&self) -> CredentialResult<()>;

    /// Returns the current session, or `None` when signed out.
    async fn current_session(&self) -> CredentialResult<Option<Session>>;
}

/// Errors returned by credential provider implementations.
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    /// An account already exists for the email address.
    #[error("email already registered: {0}")]
    EmailAlreadyRegistered(EmailAddress),

    /// No account exists for the email address.
    #[error("no account found for: {0}")]
    UnknownEmail(EmailAddress),

    /// The password does not match the stored credential.
    #[error("incorrect password")]
    IncorrectPassword,

    /// Provider-side failure.
    #[error("identity provider error: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl CredentialError {
    /// Wraps a provider-side error.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }
}
