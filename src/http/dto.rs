//! Wire representations of requests and responses.

use crate::task::domain::{CommandPreview, Instruction, Task, TaskStatus};
use crate::workspace::{WorkspaceError, WorkspaceProperties, resolve_workspace_path};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Transcoding parameters for the new task.
    pub instruction: InstructionPayload,
}

/// Instruction fields as supplied by a caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstructionPayload {
    /// Input media path.
    pub source: String,
    /// Output media path.
    pub output: String,
    /// Trim start, passed to `-ss`.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Trim end, passed to `-to`.
    #[serde(default)]
    pub end_time: Option<String>,
    /// Video codec, passed to `-c:v`.
    #[serde(default)]
    pub video_codec: Option<String>,
    /// Audio codec, passed to `-c:a`.
    #[serde(default)]
    pub audio_codec: Option<String>,
    /// Extra arguments inserted before the output path.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl InstructionPayload {
    /// Converts the payload into a domain instruction.
    ///
    /// With a workspace, `source` and `output` are resolved beneath its root
    /// and stored as absolute paths.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError`] when a path escapes the workspace.
    pub fn into_instruction(
        self,
        workspace: Option<&WorkspaceProperties>,
    ) -> Result<Instruction, WorkspaceError> {
        let (source, output) = match workspace {
            Some(props) => (
                resolve_workspace_path(props, &self.source, false)?.into_string(),
                resolve_workspace_path(props, &self.output, false)?.into_string(),
            ),
            None => (self.source, self.output),
        };

        let mut instruction = Instruction::new(source, output).with_extra_args(self.extra_args);
        if let Some(start_time) = self.start_time {
            instruction = instruction.with_start_time(start_time);
        }
        if let Some(end_time) = self.end_time {
            instruction = instruction.with_end_time(end_time);
        }
        if let Some(video_codec) = self.video_codec {
            instruction = instruction.with_video_codec(video_codec);
        }
        if let Some(audio_codec) = self.audio_codec {
            instruction = instruction.with_audio_codec(audio_codec);
        }
        Ok(instruction)
    }
}

/// JSON representation of a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskView {
    /// Task identifier.
    pub id: String,
    /// Lifecycle status literal.
    pub status: TaskStatus,
    /// Parameters the task was created from.
    pub instruction: Instruction,
    /// Rendered command and approval notice.
    pub command_preview: CommandPreview,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the latest transition.
    pub updated_at: DateTime<Utc>,
    /// Approval time.
    pub approved_at: Option<DateTime<Utc>>,
    /// Execution time.
    pub executed_at: Option<DateTime<Utc>>,
    /// Cancellation time.
    pub canceled_at: Option<DateTime<Utc>>,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            status: task.status(),
            instruction: task.instruction().clone(),
            command_preview: task.command_preview().clone(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
            approved_at: task.approved_at(),
            executed_at: task.executed_at(),
            canceled_at: task.canceled_at(),
        }
    }
}

/// Envelope for task listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskListView {
    /// Tasks in repository order.
    pub tasks: Vec<TaskView>,
}

impl From<&[Task]> for TaskListView {
    fn from(tasks: &[Task]) -> Self {
        Self {
            tasks: tasks.iter().map(TaskView::from).collect(),
        }
    }
}
