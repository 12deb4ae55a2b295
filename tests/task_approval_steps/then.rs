//! Then steps for approval lifecycle BDD scenarios.

use super::world::{TaskApprovalWorld, run_async};
use clipgate::task::{
    domain::{TaskDomainError, TaskStatus},
    services::TaskLifecycleError,
};
use rstest_bdd_macros::then;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskApprovalWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let stored = run_async(world.service.get_task(world.task()?.id()))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            stored.status().as_str()
        ));
    }
    Ok(())
}

#[then(r#"the command preview is "{command}""#)]
fn command_preview_is(world: &TaskApprovalWorld, command: String) -> Result<(), eyre::Report> {
    let actual = world.task()?.command_preview().command();
    eyre::ensure!(actual == command, "expected preview {command:?}, found {actual:?}");
    Ok(())
}

#[then("the pending list does not contain the task")]
fn pending_list_excludes_task(world: &TaskApprovalWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let pending = run_async(world.service.list_pending_tasks())?;
    eyre::ensure!(
        pending.iter().all(|task| task.id() != id),
        "task {id} is still pending"
    );
    Ok(())
}

#[then("the history contains the task once")]
fn history_contains_task_once(world: &TaskApprovalWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let history = run_async(world.service.list_history())?;
    let occurrences = history.iter().filter(|task| task.id() == id).count();
    eyre::ensure!(occurrences == 1, "task {id} appears {occurrences} times");
    Ok(())
}

#[then("the operation fails with an invalid transition error")]
fn fails_with_invalid_transition(world: &TaskApprovalWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;

    if !matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::InvalidTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidTransition error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the operation fails with a not found error")]
fn fails_with_not_found(world: &TaskApprovalWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;

    if !matches!(result, Err(err) if err.is_not_found()) {
        return Err(eyre::eyre!("expected NotFound error, got {result:?}"));
    }
    Ok(())
}

#[then("the task is returned unchanged")]
fn task_returned_unchanged(world: &TaskApprovalWorld) -> Result<(), eyre::Report> {
    let current = world.task()?;
    let previous = world
        .previous_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing previous task value"))?;
    eyre::ensure!(current == previous, "repeated cancel changed the task");
    Ok(())
}
