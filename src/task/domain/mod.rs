//! Domain model for approval-gated transcoding tasks.
//!
//! The task domain models the transcoding instruction, the rendered command
//! preview shown to an approver, and the task aggregate whose status only
//! advances along legal lifecycle edges. Infrastructure concerns stay
//! outside of the domain boundary.

mod error;
mod ids;
mod instruction;
mod preview;
mod status;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use instruction::Instruction;
pub use preview::{APPROVAL_NOTICE, CommandPreview};
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task};
