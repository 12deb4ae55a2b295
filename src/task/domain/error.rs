//! Error types for task domain transitions and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or transitioning domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The requested status change is not a legal lifecycle edge.
    #[error("task {task_id}: {}", transition_reason(*.from, *.to))]
    InvalidTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status that was requested.
        to: TaskStatus,
    },

    /// The task identifier is not a valid UUID.
    #[error("invalid task identifier '{0}'")]
    InvalidTaskId(String),
}

/// Error returned while parsing task statuses from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

fn transition_reason(from: TaskStatus, to: TaskStatus) -> String {
    match (from, to) {
        (TaskStatus::Executed, TaskStatus::Canceled) => {
            "executed tasks cannot be canceled".to_owned()
        }
        (_, TaskStatus::Approved) => {
            format!("only pending tasks can be approved (current status: {from})")
        }
        _ => format!("cannot transition from {from} to {to}"),
    }
}
