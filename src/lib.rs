//! Clipgate: an approval-gated queue of media-transcoding commands.
//!
//! Callers submit transcoding instructions; each one is rendered into a
//! command preview and held until a human approves or cancels it. Nothing
//! is executed without approval.
//!
//! # Architecture
//!
//! Clipgate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (storage, HTTP)
//!
//! # Modules
//!
//! - [`task`]: Command previews and the approval lifecycle
//! - [`workspace`]: Workspace root, path confinement, and settings
//! - [`http`]: Axum routes over the lifecycle service
//! - [`config`]: Environment-driven process configuration

pub mod config;
pub mod http;
pub mod task;
pub mod workspace;
