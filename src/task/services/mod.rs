//! Application services for task lifecycle orchestration.

mod approval_gate;
mod lifecycle;

pub use lifecycle::{TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService};
