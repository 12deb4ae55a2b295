//! Given steps for approval lifecycle BDD scenarios.

use super::world::{TaskApprovalWorld, run_async};
use clipgate::task::domain::Instruction;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a trim of "{source}" into "{output}" from "{start}" to "{end}" using "{codec}""#)]
fn trim_instruction(
    world: &mut TaskApprovalWorld,
    source: String,
    output: String,
    start: String,
    end: String,
    codec: String,
) {
    world.pending_instruction = Some(
        Instruction::new(source, output)
            .with_start_time(start)
            .with_end_time(end)
            .with_video_codec(codec),
    );
}

fn queue_pending(world: &mut TaskApprovalWorld) -> Result<(), eyre::Report> {
    let instruction = world
        .pending_instruction
        .clone()
        .ok_or_else(|| eyre::eyre!("missing instruction in scenario world"))?;
    let created = run_async(world.service.create_task(instruction))
        .wrap_err("queue task for scenario setup")?;
    world.current_task = Some(created);
    Ok(())
}

#[given("the task has been queued and canceled")]
fn queued_and_canceled(world: &mut TaskApprovalWorld) -> Result<(), eyre::Report> {
    queue_pending(world)?;
    let id = world.task()?.id();
    let canceled =
        run_async(world.service.cancel_task(id)).wrap_err("cancel task in scenario setup")?;
    world.current_task = Some(canceled);
    Ok(())
}

#[given("the task has been queued and approved")]
fn queued_and_approved(world: &mut TaskApprovalWorld) -> Result<(), eyre::Report> {
    queue_pending(world)?;
    let id = world.task()?.id();
    let executed =
        run_async(world.service.approve_task(id)).wrap_err("approve task in scenario setup")?;
    world.current_task = Some(executed);
    Ok(())
}
