//! Workspace configuration consumed by callers before queuing tasks.
//!
//! The workspace supplies an absolute root directory and a path resolver
//! that rejects any path escaping that root. Settings, including the
//! workspace root, are persisted as a versioned JSON document. The task
//! lifecycle itself never validates paths; inbound adapters resolve user
//! paths here before building an instruction.

mod config;
mod error;
mod path;
mod settings;

pub use config::WorkspaceProperties;
pub use error::WorkspaceError;
pub use path::{normalize, resolve_workspace_path};
pub use settings::{CURRENT_VERSION, Settings, SettingsStore, SettingsUpdate, migrate};
