//! Locations and the assets they contain.
//!
//! Administrators own the locations they create; assets belong to exactly
//! one location for their whole lifetime. Deleting a location cascades
//! through its assets and their tasks with per-step failure capture, while
//! completion history is never part of any cascade. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
