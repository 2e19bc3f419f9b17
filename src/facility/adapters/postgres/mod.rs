//! `PostgreSQL` adapters for facility persistence.
//!
//! These adapters do not implement the location watch port; embedders on
//! `PostgreSQL` poll the list instead.

mod models;
mod repository;
mod schema;

pub use repository::{FacilityPgPool, PostgresAssetRepository, PostgresLocationRepository};
