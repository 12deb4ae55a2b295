//! Task aggregate root and its replace-on-transition lifecycle.

use super::{CommandPreview, Instruction, TaskDomainError, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// Values are immutable: every transition returns a new task carrying the
/// updated status and timestamps, leaving the original untouched. The
/// identifier, instruction, and command preview never change after
/// creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    instruction: Instruction,
    command_preview: CommandPreview,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
    executed_at: Option<DateTime<Utc>>,
    canceled_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted transcoding instruction.
    pub instruction: Instruction,
    /// Persisted command preview.
    pub command_preview: CommandPreview,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted approval timestamp, if any.
    pub approved_at: Option<DateTime<Utc>>,
    /// Persisted execution timestamp, if any.
    pub executed_at: Option<DateTime<Utc>>,
    /// Persisted cancellation timestamp, if any.
    pub canceled_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task awaiting approval.
    #[must_use]
    pub fn new(
        instruction: Instruction,
        command_preview: CommandPreview,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            instruction,
            command_preview,
            status: TaskStatus::PendingApproval,
            created_at: timestamp,
            updated_at: timestamp,
            approved_at: None,
            executed_at: None,
            canceled_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            instruction: data.instruction,
            command_preview: data.command_preview,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
            approved_at: data.approved_at,
            executed_at: data.executed_at,
            canceled_at: data.canceled_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the transcoding instruction.
    #[must_use]
    pub const fn instruction(&self) -> &Instruction {
        &self.instruction
    }

    /// Returns the command preview rendered at creation time.
    #[must_use]
    pub const fn command_preview(&self) -> &CommandPreview {
        &self.command_preview
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns when the task was approved, if it was.
    #[must_use]
    pub const fn approved_at(&self) -> Option<DateTime<Utc>> {
        self.approved_at
    }

    /// Returns when the task was executed, if it was.
    #[must_use]
    pub const fn executed_at(&self) -> Option<DateTime<Utc>> {
        self.executed_at
    }

    /// Returns when the task was canceled, if it was.
    #[must_use]
    pub const fn canceled_at(&self) -> Option<DateTime<Utc>> {
        self.canceled_at
    }

    /// Returns an approved copy of this task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is
    /// pending approval.
    pub fn approve(&self, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        self.advance(TaskStatus::Approved, clock)
    }

    /// Returns an executed copy of this task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task has
    /// been approved.
    pub fn mark_executed(&self, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        self.advance(TaskStatus::Executed, clock)
    }

    /// Returns a canceled copy of this task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the task is
    /// already executed or canceled.
    pub fn cancel(&self, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        self.advance(TaskStatus::Canceled, clock)
    }

    /// Builds the successor value for a legal status edge.
    ///
    /// The timestamp matching the target status is filled in only if it is
    /// still empty. Transition times never precede the previous update, even
    /// if the clock steps backwards.
    fn advance(&self, next: TaskStatus, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        if !self.status.can_transition_to(next) {
            return Err(TaskDomainError::InvalidTransition {
                task_id: self.id,
                from: self.status,
                to: next,
            });
        }

        let timestamp = clock.utc().max(self.updated_at);
        let mut successor = self.clone();
        successor.status = next;
        successor.updated_at = timestamp;
        let stamp = match next {
            TaskStatus::PendingApproval => None,
            TaskStatus::Approved => Some(&mut successor.approved_at),
            TaskStatus::Executed => Some(&mut successor.executed_at),
            TaskStatus::Canceled => Some(&mut successor.canceled_at),
        };
        if let Some(field) = stamp {
            field.get_or_insert(timestamp);
        }
        Ok(successor)
    }
}
