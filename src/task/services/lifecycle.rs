//! Service layer for task creation, approval, and cancellation.

use super::approval_gate::ApprovalGates;
use crate::task::{
    domain::{CommandPreview, Instruction, Task, TaskDomainError, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskLifecycleError {
    /// Returns `true` when the requested task does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(TaskRepositoryError::NotFound(_)))
    }

    /// Returns `true` when the requested operation is illegal for the
    /// task's current status.
    #[must_use]
    pub const fn is_invalid_transition(&self) -> bool {
        matches!(
            self,
            Self::Domain(TaskDomainError::InvalidTransition { .. })
        )
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Every successful transition is written through to the repository. The
/// service never retries: domain and repository errors propagate to the
/// caller unchanged.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    approval_gates: Arc<ApprovalGates>,
}

impl<R, C> Clone for TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            approval_gates: Arc::clone(&self.approval_gates),
        }
    }
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            approval_gates: Arc::new(ApprovalGates::default()),
        }
    }

    /// Returns the repository backing this service.
    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Renders the command preview and queues a task awaiting approval.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the repository rejects
    /// persistence.
    pub async fn create_task(&self, instruction: Instruction) -> TaskLifecycleResult<Task> {
        let command_preview = CommandPreview::build(&instruction);
        let task = Task::new(instruction, command_preview, &*self.clock);
        self.repository.add(&task).await?;
        info!(
            task_id = %task.id(),
            command = task.command_preview().command(),
            "task queued for approval"
        );
        Ok(task)
    }

    /// Returns tasks still awaiting approval.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_pending_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self
            .repository
            .list_by_status(TaskStatus::PendingApproval)
            .await?)
    }

    /// Returns every task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_history(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_all().await?)
    }

    /// Returns a single task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] wrapping
    /// [`TaskRepositoryError::NotFound`] when the task does not exist.
    pub async fn get_task(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        Ok(self.repository.get(id).await?)
    }

    /// Approves a pending task and records its execution.
    ///
    /// The approved and executed values are persisted as two separate
    /// writes, so the intermediate `approved` status is observable in the
    /// repository. Concurrent approvals of the same task are serialized;
    /// a concurrent cancellation is not.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task does not
    /// exist or persistence fails, and [`TaskLifecycleError::Domain`] when
    /// the task is not pending approval.
    pub async fn approve_task(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        let _permit = self.approval_gates.acquire(id).await;

        let task = self.repository.get(id).await?;
        let approved = task.approve(&*self.clock).inspect_err(|err| {
            warn!(task_id = %id, status = %task.status(), error = %err, "approval rejected");
        })?;
        self.repository.update(&approved).await?;
        info!(task_id = %id, "task approved");

        let executed = self.execute(&approved)?;
        self.repository.update(&executed).await?;
        info!(task_id = %id, "task executed");
        Ok(executed)
    }

    /// Cancels a task that has not been executed.
    ///
    /// Canceling an already canceled task returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task does not
    /// exist or persistence fails, and [`TaskLifecycleError::Domain`] when
    /// the task has already been executed.
    pub async fn cancel_task(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        let task = self.repository.get(id).await?;
        if task.status() == TaskStatus::Canceled {
            debug!(task_id = %id, "task already canceled");
            return Ok(task);
        }

        let canceled = task.cancel(&*self.clock).inspect_err(|err| {
            warn!(task_id = %id, status = %task.status(), error = %err, "cancellation rejected");
        })?;
        self.repository.update(&canceled).await?;
        info!(task_id = %id, "task canceled");
        Ok(canceled)
    }

    /// Marks an approved task as executed.
    ///
    /// Running the rendered command is out of scope for this service; this
    /// is the seam where real execution would be interposed.
    fn execute(&self, approved: &Task) -> TaskLifecycleResult<Task> {
        Ok(approved.mark_executed(&*self.clock)?)
    }
}
