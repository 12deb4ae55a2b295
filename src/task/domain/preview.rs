//! Deterministic rendering of the command shown to an approver.

use super::Instruction;
use serde::{Deserialize, Serialize};

/// Notice attached to every preview while the command awaits a decision.
pub const APPROVAL_NOTICE: &str = "Pending approval before execution";

/// Rendered, human-readable command for a task.
///
/// The command is advisory text: tokens are joined with single spaces and
/// never quoted or escaped, so it must be tokenized separately before any
/// real invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandPreview {
    command: String,
    description: Option<String>,
}

impl CommandPreview {
    /// Reconstructs a preview from its stored parts.
    #[must_use]
    pub fn new(command: impl Into<String>, description: Option<String>) -> Self {
        Self {
            command: command.into(),
            description,
        }
    }

    /// Renders the preview for an instruction.
    ///
    /// Token order is fixed: `ffmpeg -y -i <source>`, then `-ss`, `-to`,
    /// `-c:v`, `-c:a` for each optional field that is set and non-empty,
    /// then the extra arguments verbatim, then the output path.
    #[must_use]
    pub fn build(instruction: &Instruction) -> Self {
        let mut tokens: Vec<&str> = vec!["ffmpeg", "-y", "-i", instruction.source()];

        let flagged = [
            ("-ss", instruction.start_time()),
            ("-to", instruction.end_time()),
            ("-c:v", instruction.video_codec()),
            ("-c:a", instruction.audio_codec()),
        ];
        for (flag, value) in flagged {
            if let Some(set) = value.filter(|candidate| !candidate.is_empty()) {
                tokens.push(flag);
                tokens.push(set);
            }
        }

        tokens.extend(instruction.extra_args().iter().map(String::as_str));
        tokens.push(instruction.output());

        Self {
            command: tokens.join(" "),
            description: Some(APPROVAL_NOTICE.to_owned()),
        }
    }

    /// Returns the rendered command string.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns the human-readable note attached to the command.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
