//! Shared test helpers for in-memory integration tests.

use clipgate::task::{
    adapters::memory::InMemoryTaskRepository, domain::Instruction,
    services::TaskLifecycleService,
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Service type used across in-memory tests.
pub type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Provides a service over a fresh in-memory repository.
#[fixture]
pub fn service() -> TestService {
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// Builds the trim instruction used throughout the lifecycle scenarios.
#[must_use]
pub fn trim_instruction() -> Instruction {
    Instruction::new("in.mp4", "out.mp4")
        .with_start_time("00:00:10")
        .with_end_time("00:00:20")
        .with_video_codec("libx264")
}

/// Builds a minimal instruction with distinct file names.
#[must_use]
pub fn numbered_instruction(index: usize) -> Instruction {
    Instruction::new(format!("clip-{index}.mov"), format!("clip-{index}.mp4"))
}
