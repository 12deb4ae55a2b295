//! When steps for approval lifecycle BDD scenarios.

use super::world::{TaskApprovalWorld, run_async};
use clipgate::task::domain::TaskId;
use rstest_bdd_macros::when;

#[when("the task is queued")]
fn queue_task(world: &mut TaskApprovalWorld) -> Result<(), eyre::Report> {
    let instruction = world
        .pending_instruction
        .clone()
        .ok_or_else(|| eyre::eyre!("missing instruction in scenario world"))?;
    let result = run_async(world.service.create_task(instruction));
    world.record(result);
    Ok(())
}

#[when("the task is approved")]
fn approve_task(world: &mut TaskApprovalWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let result = run_async(world.service.approve_task(id));
    world.record(result);
    Ok(())
}

#[when("the task is canceled")]
fn cancel_task(world: &mut TaskApprovalWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let result = run_async(world.service.cancel_task(id));
    world.record(result);
    Ok(())
}

#[when("an unknown task is approved")]
fn approve_unknown_task(world: &mut TaskApprovalWorld) {
    let result = run_async(world.service.approve_task(TaskId::new()));
    world.record(result);
}
