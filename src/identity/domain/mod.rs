//! Domain model for identities and access control.
//!
//! Models validated email addresses, signup roles, and the permission
//! checks services apply before any write, while keeping all credential
//! and session infrastructure outside of the domain boundary.

mod account;
mod error;
mod ids;

pub use account::{Identity, Role, UserAccount};
pub use error::{IdentityDomainError, ParseRoleError, PermissionError};
pub use ids::{EmailAddress, Password, UserId};
