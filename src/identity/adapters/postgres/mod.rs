//! `PostgreSQL` adapters for identity persistence.

mod directory;
mod models;
mod schema;

pub use directory::{IdentityPgPool, PostgresUserDirectory};
