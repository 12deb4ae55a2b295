//! Request handlers. Each one delegates to the lifecycle service.

use super::{
    dto::{CreateTaskRequest, TaskListView, TaskView},
    error::ApiError,
    state::AppState,
};
use crate::task::{domain::TaskId, ports::TaskRepository};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use mockable::Clock;

pub(super) async fn create_task<R, C>(
    State(state): State<AppState<R, C>>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskView>), ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let instruction = request.instruction.into_instruction(state.workspace())?;
    let task = state.service().create_task(instruction).await?;
    Ok((StatusCode::CREATED, Json(TaskView::from(&task))))
}

pub(super) async fn list_pending<R, C>(
    State(state): State<AppState<R, C>>,
) -> Result<Json<TaskListView>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let tasks = state.service().list_pending_tasks().await?;
    Ok(Json(TaskListView::from(tasks.as_slice())))
}

pub(super) async fn list_history<R, C>(
    State(state): State<AppState<R, C>>,
) -> Result<Json<TaskListView>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let tasks = state.service().list_history().await?;
    Ok(Json(TaskListView::from(tasks.as_slice())))
}

pub(super) async fn approve_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(id): Path<String>,
) -> Result<Json<TaskView>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = state.service().approve_task(TaskId::parse(&id)?).await?;
    Ok(Json(TaskView::from(&task)))
}

pub(super) async fn cancel_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(id): Path<String>,
) -> Result<Json<TaskView>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = state.service().cancel_task(TaskId::parse(&id)?).await?;
    Ok(Json(TaskView::from(&task)))
}
