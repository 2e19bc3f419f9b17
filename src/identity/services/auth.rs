//! Service layer for signup, sign-in, and identity resolution.

use crate::identity::{
    domain::{EmailAddress, Identity, IdentityDomainError, Password, Role, UserAccount, UserId},
    ports::{
        CredentialError, IdentityProvider, UserDirectory, UserDirectoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating an account.
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    email: String,
    password: String,
    role: Role,
}

impl SignUpRequest {
    /// Creates a signup request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role,
        }
    }
}

/// Service-level errors for auth operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Credential provider rejected the operation.
    #[error(transparent)]
    Credential(#[from] CredentialError),
    /// User directory operation failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
    /// Credentials exist but the signup role record is gone.
    #[error("no role record exists for user {0}")]
    AccountRecordMissing(UserId),
}

/// Result type for auth service operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Signup and sign-in orchestration service.
///
/// Joins provider credentials with the stored role record. The resolved
/// [`Identity`] is handed to callers; core services never consult the
/// provider's session themselves.
#[derive(Clone)]
pub struct AuthService<P, D, C>
where
    P: IdentityProvider,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    provider: Arc<P>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<P, D, C> AuthService<P, D, C>
where
    P: IdentityProvider,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new auth service.
    #[must_use]
    pub const fn new(provider: Arc<P>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            provider,
            directory,
            clock,
        }
    }

    /// Registers a new account with the chosen role and signs it in.
    ///
    /// The role is fixed here for the lifetime of the account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the email or password fails validation,
    /// the email is already registered, or the role record cannot be
    /// stored.
    pub async fn sign_up(&self, request: SignUpRequest) -> AuthResult<Identity> {
        let email = EmailAddress::new(request.email)?;
        let password = Password::new(request.password)?;
        if !password.meets_signup_length() {
            return Err(AuthError::Domain(IdentityDomainError::PasswordTooShort {
                minimum: Password::MIN_SIGNUP_LENGTH,
            }));
        }

        let uid = self.provider.register(&email, &password).await?;
        let account = UserAccount::new(uid, email.clone(), request.role, self.clock.utc());
        self.directory.store(&account).await?;

        tracing::info!(%uid, role = request.role.as_str(), "account registered");
        Ok(Identity::new(uid, email, request.role))
    }

    /// Verifies credentials and resolves the caller's identity.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the email is malformed, the credentials
    /// do not match, or no role record exists for the account.
    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Identity> {
        let address = EmailAddress::new(email)?;
        let candidate = Password::new(password)?;
        let uid = self.provider.authenticate(&address, &candidate).await?;
        self.resolve(uid).await
    }

    /// Ends the provider session, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Credential`] when the provider fails.
    pub async fn sign_out(&self) -> AuthResult<()> {
        self.provider.sign_out().await?;
        Ok(())
    }

    /// Returns the identity of the currently signed-in user, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AccountRecordMissing`] when a session exists
    /// but its role record is gone.
    pub async fn current_identity(&self) -> AuthResult<Option<Identity>> {
        let Some(session) = self.provider.current_session().await? else {
            return Ok(None);
        };
        self.resolve(session.uid).await.map(Some)
    }

    async fn resolve(&self, uid: UserId) -> AuthResult<Identity> {
        let account = self
            .directory
            .find_by_uid(uid)
            .await?
            .ok_or(AuthError::AccountRecordMissing(uid))?;
        Ok(account.identity())
    }
}
