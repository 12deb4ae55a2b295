//! Shared handler state.

use crate::task::{ports::TaskRepository, services::TaskLifecycleService};
use crate::workspace::WorkspaceProperties;
use mockable::Clock;
use std::sync::Arc;

/// Dependencies handed to every request handler.
///
/// Built once at start-up and cloned per request; clones share the same
/// service and workspace.
pub struct AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    service: TaskLifecycleService<R, C>,
    workspace: Option<Arc<WorkspaceProperties>>,
}

impl<R, C> Clone for AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            workspace: self.workspace.clone(),
        }
    }
}

impl<R, C> AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates state that passes instruction paths through unchanged.
    #[must_use]
    pub const fn new(service: TaskLifecycleService<R, C>) -> Self {
        Self {
            service,
            workspace: None,
        }
    }

    /// Confines instruction paths to the given workspace.
    #[must_use]
    pub fn with_workspace(mut self, workspace: WorkspaceProperties) -> Self {
        self.workspace = Some(Arc::new(workspace));
        self
    }

    /// Returns the task lifecycle service.
    #[must_use]
    pub const fn service(&self) -> &TaskLifecycleService<R, C> {
        &self.service
    }

    /// Returns the workspace paths are resolved against, if any.
    #[must_use]
    pub fn workspace(&self) -> Option<&WorkspaceProperties> {
        self.workspace.as_deref()
    }
}
