//! User-supplied transcoding parameters.

use serde::{Deserialize, Serialize};

/// Immutable description of a trim-and-export request.
///
/// Paths, trim bounds, and codec names are opaque strings at this layer; no
/// existence or format validation is performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    source: String,
    output: String,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    end_time: Option<String>,
    #[serde(default)]
    video_codec: Option<String>,
    #[serde(default)]
    audio_codec: Option<String>,
    #[serde(default)]
    extra_args: Vec<String>,
}

impl Instruction {
    /// Creates an instruction with the required source and output paths.
    #[must_use]
    pub fn new(source: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
            start_time: None,
            end_time: None,
            video_codec: None,
            audio_codec: None,
            extra_args: Vec::new(),
        }
    }

    /// Sets the clip start time passed to `-ss`.
    #[must_use]
    pub fn with_start_time(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    /// Sets the clip end time passed to `-to`.
    #[must_use]
    pub fn with_end_time(mut self, end_time: impl Into<String>) -> Self {
        self.end_time = Some(end_time.into());
        self
    }

    /// Sets the codec passed to `-c:v`.
    #[must_use]
    pub fn with_video_codec(mut self, video_codec: impl Into<String>) -> Self {
        self.video_codec = Some(video_codec.into());
        self
    }

    /// Sets the codec passed to `-c:a`.
    #[must_use]
    pub fn with_audio_codec(mut self, audio_codec: impl Into<String>) -> Self {
        self.audio_codec = Some(audio_codec.into());
        self
    }

    /// Sets additional flags appended verbatim before the output path.
    #[must_use]
    pub fn with_extra_args(mut self, extra_args: impl IntoIterator<Item = String>) -> Self {
        self.extra_args = extra_args.into_iter().collect();
        self
    }

    /// Returns the input file or stream.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the destination file.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Returns the clip start time, if any.
    #[must_use]
    pub fn start_time(&self) -> Option<&str> {
        self.start_time.as_deref()
    }

    /// Returns the clip end time, if any.
    #[must_use]
    pub fn end_time(&self) -> Option<&str> {
        self.end_time.as_deref()
    }

    /// Returns the video codec, if any.
    #[must_use]
    pub fn video_codec(&self) -> Option<&str> {
        self.video_codec.as_deref()
    }

    /// Returns the audio codec, if any.
    #[must_use]
    pub fn audio_codec(&self) -> Option<&str> {
        self.audio_codec.as_deref()
    }

    /// Returns the additional flags in submission order.
    #[must_use]
    pub fn extra_args(&self) -> &[String] {
        &self.extra_args
    }
}
