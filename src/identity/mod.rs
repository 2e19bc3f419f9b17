//! Identity and access management for Upkeep.
//!
//! Authenticates users against a credential provider, stores the role
//! document created at signup, and exposes the [`domain::Identity`] value
//! that every core operation receives explicitly. Roles are fixed at signup
//! and never change. The module follows hexagonal architecture:
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
