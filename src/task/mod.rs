//! Task lifecycle management for Upkeep.
//!
//! Tasks are recurring maintenance actions on assets: created unassigned,
//! assigned to a worker by email, and completed against a checklist with
//! optional photo evidence. Completion never terminates a task — it closes
//! the current cycle and the task becomes actionable again on reassignment.
//! Every completion appends an immutable record to the history log, which
//! outlives both the task and its location. The module follows hexagonal
//! architecture:
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
