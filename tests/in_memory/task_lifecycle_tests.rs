//! In-memory integration tests for task lifecycle operations.

use super::helpers::{TestService, numbered_instruction, service, trim_instruction};
use clipgate::task::{
    domain::{APPROVAL_NOTICE, TaskDomainError, TaskId, TaskStatus},
    ports::TaskRepository,
    services::TaskLifecycleError,
};
use eyre::{WrapErr, ensure};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_awaits_approval_with_rendered_preview(
    service: TestService,
) -> eyre::Result<()> {
    let task = service
        .create_task(trim_instruction())
        .await
        .wrap_err("create trim task")?;

    ensure!(task.status() == TaskStatus::PendingApproval);
    ensure!(
        task.command_preview().command()
            == "ffmpeg -y -i in.mp4 -ss 00:00:10 -to 00:00:20 -c:v libx264 out.mp4"
    );
    ensure!(task.command_preview().description() == Some(APPROVAL_NOTICE));
    ensure!(task.created_at() == task.updated_at());
    ensure!(task.approved_at().is_none());
    ensure!(task.executed_at().is_none());
    ensure!(task.canceled_at().is_none());

    let pending = service.list_pending_tasks().await?;
    ensure!(pending.len() == 1, "expected one pending task");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approve_executes_and_leaves_pending_list(service: TestService) -> eyre::Result<()> {
    let created = service.create_task(trim_instruction()).await?;

    let executed = service
        .approve_task(created.id())
        .await
        .wrap_err("approve trim task")?;

    ensure!(executed.status() == TaskStatus::Executed);
    let approved_at = executed
        .approved_at()
        .ok_or_else(|| eyre::eyre!("approved_at not recorded"))?;
    let executed_at = executed
        .executed_at()
        .ok_or_else(|| eyre::eyre!("executed_at not recorded"))?;
    ensure!(approved_at <= executed_at);

    let pending = service.list_pending_tasks().await?;
    ensure!(pending.iter().all(|task| task.id() != created.id()));

    let history = service.list_history().await?;
    let matching = history
        .iter()
        .filter(|task| task.id() == created.id())
        .count();
    ensure!(matching == 1, "expected exactly one history entry");
    ensure!(service.get_task(created.id()).await? == executed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn canceled_task_cannot_be_approved_and_cancel_is_idempotent(
    service: TestService,
) -> eyre::Result<()> {
    let _first = service.create_task(trim_instruction()).await?;
    let second = service.create_task(numbered_instruction(2)).await?;

    let canceled = service.cancel_task(second.id()).await?;
    ensure!(canceled.status() == TaskStatus::Canceled);
    ensure!(canceled.canceled_at().is_some());

    let approve_result = service.approve_task(second.id()).await;
    ensure!(
        matches!(
            approve_result,
            Err(TaskLifecycleError::Domain(
                TaskDomainError::InvalidTransition { .. }
            ))
        ),
        "expected invalid transition, got {approve_result:?}"
    );

    let again = service.cancel_task(second.id()).await?;
    ensure!(again == canceled, "repeated cancel must return the same task");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn executed_task_cannot_be_canceled(service: TestService) -> eyre::Result<()> {
    let created = service.create_task(numbered_instruction(1)).await?;
    let executed = service.approve_task(created.id()).await?;

    let result = service.cancel_task(created.id()).await;

    ensure!(matches!(result, Err(ref err) if err.is_invalid_transition()));
    ensure!(service.get_task(created.id()).await? == executed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_identifier_is_not_found_everywhere(service: TestService) -> eyre::Result<()> {
    let missing = TaskId::new();

    ensure!(matches!(service.approve_task(missing).await, Err(ref err) if err.is_not_found()));
    ensure!(matches!(service.cancel_task(missing).await, Err(ref err) if err.is_not_found()));
    ensure!(matches!(service.get_task(missing).await, Err(ref err) if err.is_not_found()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn history_is_ordered_by_creation_after_mutations(service: TestService) -> eyre::Result<()> {
    let mut created = Vec::new();
    for index in 0..4 {
        created.push(service.create_task(numbered_instruction(index)).await?.id());
    }
    let (Some(&third), Some(&first)) = (created.get(2), created.first()) else {
        eyre::bail!("expected four created tasks");
    };
    service.approve_task(third).await?;
    service.cancel_task(first).await?;

    let history = service.list_history().await?;

    ensure!(history.len() == created.len());
    ensure!(
        history
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a.created_at() <= b.created_at()))
    );
    let pending = service.repository().list_by_status(TaskStatus::PendingApproval).await?;
    ensure!(pending.len() == 2);
    Ok(())
}
