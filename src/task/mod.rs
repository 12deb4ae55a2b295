//! Approval-gated task lifecycle for transcoding commands.
//!
//! A task wraps one [`domain::Instruction`] together with the command
//! preview rendered from it. Tasks start pending approval and advance only
//! along legal edges: approval (followed by execution) or cancellation. The
//! module follows hexagonal architecture:
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
