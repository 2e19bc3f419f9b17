//! Application services for identity management.

mod auth;

pub use auth::{AuthError, AuthResult, AuthService, SignUpRequest};
