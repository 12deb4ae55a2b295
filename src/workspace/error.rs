//! Error types for workspace configuration and path resolution.

use camino::Utf8PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by workspace configuration, path, and settings helpers.
#[derive(Debug, Clone, Error)]
pub enum WorkspaceError {
    /// The configuration document is missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A requested path resolves outside of the workspace root.
    #[error("requested path '{requested}' resolves outside workspace '{root}'")]
    OutsideWorkspace {
        /// Path as supplied by the caller.
        requested: String,
        /// Workspace root the path was checked against.
        root: Utf8PathBuf,
    },

    /// A path that was required to exist does not.
    #[error("path does not exist: {0}")]
    Missing(Utf8PathBuf),

    /// A settings document has no migration path to the current version.
    #[error("no settings migration path from version {0}")]
    UnsupportedVersion(u64),

    /// Filesystem access failed.
    #[error("filesystem error: {0}")]
    Io(Arc<std::io::Error>),
}

impl From<std::io::Error> for WorkspaceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for WorkspaceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl WorkspaceError {
    /// Returns `true` when the error stems from caller input rather than
    /// from the environment.
    #[must_use]
    pub const fn is_rejected_path(&self) -> bool {
        matches!(self, Self::OutsideWorkspace { .. } | Self::Missing(_))
    }
}
