//! Roles, authenticated identities, and the stored user record.

use super::{EmailAddress, ParseRoleError, PermissionError, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role chosen at signup, fixed for the lifetime of the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Manages locations, assets, and tasks; assigns work.
    Admin,
    /// Completes tasks assigned to their email address.
    Worker,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Worker => "worker",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "worker" => Ok(Self::Worker),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Authenticated caller passed explicitly into every core operation.
///
/// There is no ambient "current user" in the services; whoever drives the
/// crate resolves an identity first and hands it to each call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    uid: UserId,
    email: EmailAddress,
    role: Role,
}

impl Identity {
    /// Creates an identity from its resolved parts.
    #[must_use]
    pub const fn new(uid: UserId, email: EmailAddress, role: Role) -> Self {
        Self { uid, email, role }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn uid(&self) -> UserId {
        self.uid
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the signup role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Rejects callers that are not administrators.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::AdminRequired`] for non-admin callers.
    pub const fn require_admin(&self, action: &'static str) -> Result<(), PermissionError> {
        match self.role {
            Role::Admin => Ok(()),
            Role::Worker => Err(PermissionError::AdminRequired { action }),
        }
    }

    /// Rejects callers that are not workers.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::WorkerRequired`] for non-worker callers.
    pub const fn require_worker(&self, action: &'static str) -> Result<(), PermissionError> {
        match self.role {
            Role::Worker => Ok(()),
            Role::Admin => Err(PermissionError::WorkerRequired { action }),
        }
    }
}

/// Stored `users` record linking a credential uid to its email and role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    uid: UserId,
    email: EmailAddress,
    role: Role,
    created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Creates a user record.
    #[must_use]
    pub const fn new(uid: UserId, email: EmailAddress, role: Role, created_at: DateTime<Utc>) -> Self {
        Self {
            uid,
            email,
            role,
            created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn uid(&self) -> UserId {
        self.uid
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the signup role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the record creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the identity this record resolves to.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::new(self.uid, self.email.clone(), self.role)
    }
}
