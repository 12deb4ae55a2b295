//! Parallel callers sharing one lifecycle service.

use super::helpers::{TestService, numbered_instruction, service, trim_instruction};
use clipgate::task::domain::TaskStatus;
use eyre::ensure;
use rstest::rstest;
use std::collections::HashSet;
use tokio::task::JoinSet;

const CALLERS: usize = 8;

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_approvals_execute_exactly_once(service: TestService) -> eyre::Result<()> {
    let created = service.create_task(trim_instruction()).await?;

    let mut approvals = JoinSet::new();
    for _ in 0..CALLERS {
        let caller = service.clone();
        let id = created.id();
        approvals.spawn(async move { caller.approve_task(id).await });
    }

    let mut succeeded = 0_usize;
    let mut rejected = 0_usize;
    while let Some(joined) = approvals.join_next().await {
        match joined? {
            Ok(task) => {
                ensure!(task.status() == TaskStatus::Executed);
                succeeded += 1;
            }
            Err(err) if err.is_invalid_transition() => rejected += 1,
            Err(err) => eyre::bail!("unexpected approval failure: {err}"),
        }
    }

    ensure!(succeeded == 1, "expected one approval, got {succeeded}");
    ensure!(rejected == CALLERS - 1);
    ensure!(service.get_task(created.id()).await?.status() == TaskStatus::Executed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_are_all_stored(service: TestService) -> eyre::Result<()> {
    let mut creates = JoinSet::new();
    for index in 0..CALLERS {
        let caller = service.clone();
        creates.spawn(async move { caller.create_task(numbered_instruction(index)).await });
    }

    let mut ids = HashSet::new();
    while let Some(joined) = creates.join_next().await {
        ids.insert(joined??.id());
    }

    let history = service.list_history().await?;
    ensure!(ids.len() == CALLERS);
    ensure!(history.len() == CALLERS);
    ensure!(history.iter().all(|task| ids.contains(&task.id())));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_cancels_agree_on_one_value(service: TestService) -> eyre::Result<()> {
    let created = service.create_task(trim_instruction()).await?;

    let mut cancels = JoinSet::new();
    for _ in 0..CALLERS {
        let caller = service.clone();
        let id = created.id();
        cancels.spawn(async move { caller.cancel_task(id).await });
    }

    while let Some(joined) = cancels.join_next().await {
        ensure!(joined??.status() == TaskStatus::Canceled);
    }
    let stored = service.get_task(created.id()).await?;
    ensure!(stored.status() == TaskStatus::Canceled);
    ensure!(service.cancel_task(created.id()).await? == stored);
    Ok(())
}
