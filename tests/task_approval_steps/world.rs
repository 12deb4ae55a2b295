//! Shared world state for approval lifecycle BDD scenarios.

use std::sync::Arc;

use clipgate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Instruction, Task},
    services::{TaskLifecycleError, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for approval lifecycle behaviour tests.
pub struct TaskApprovalWorld {
    pub service: TestTaskService,
    pub pending_instruction: Option<Instruction>,
    pub current_task: Option<Task>,
    pub previous_task: Option<Task>,
    pub last_result: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskApprovalWorld {
    /// Creates a world with an empty repository.
    #[must_use]
    pub fn new() -> Self {
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            pending_instruction: None,
            current_task: None,
            previous_task: None,
            last_result: None,
        }
    }

    /// Returns the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been queued yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.current_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing queued task in scenario world"))
    }

    /// Records an operation result, tracking the task on success.
    pub fn record(&mut self, result: Result<Task, TaskLifecycleError>) {
        if let Ok(ref updated) = result {
            self.previous_task = self.current_task.replace(updated.clone());
        }
        self.last_result = Some(result);
    }
}

impl Default for TaskApprovalWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskApprovalWorld {
    TaskApprovalWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
