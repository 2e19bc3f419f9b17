//! Error types for identity domain validation and access control.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The email address is empty after trimming.
    #[error("email address must not be empty")]
    EmptyEmail,

    /// The email address does not have a plausible `local@domain` shape.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The password is empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// The password does not satisfy the signup length policy.
    #[error("password must be at least {minimum} characters")]
    PasswordTooShort {
        /// Required minimum length.
        minimum: usize,
    },
}

/// Error returned while parsing roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Access-control failures, rejected before any write reaches a store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PermissionError {
    /// The operation is restricted to administrators.
    #[error("operation '{action}' requires the admin role")]
    AdminRequired {
        /// Name of the rejected operation.
        action: &'static str,
    },

    /// The operation is restricted to workers.
    #[error("operation '{action}' requires the worker role")]
    WorkerRequired {
        /// Name of the rejected operation.
        action: &'static str,
    },

    /// The caller does not own the targeted resource.
    #[error("caller does not own {resource} {id}")]
    NotOwner {
        /// Kind of resource the check applied to.
        resource: &'static str,
        /// Rendered identifier of the resource.
        id: String,
    },

    /// The caller is not the task's current assignee.
    #[error("task {task} is not assigned to the caller")]
    NotAssignee {
        /// Rendered identifier of the task.
        task: String,
    },
}
