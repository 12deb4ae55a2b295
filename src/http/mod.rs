//! Axum inbound adapter exposing the task lifecycle over HTTP.
//!
//! | Route | Handler |
//! |---|---|
//! | `POST /tasks` | queue a task awaiting approval |
//! | `GET /tasks/pending` | list tasks awaiting approval |
//! | `GET /tasks/history` | list every task, oldest first |
//! | `POST /tasks/{id}/approve` | approve and execute a pending task |
//! | `POST /tasks/{id}/cancel` | cancel a task that has not executed |

mod dto;
mod error;
mod handlers;
mod state;

pub use dto::{CreateTaskRequest, InstructionPayload, TaskListView, TaskView};
pub use error::ApiError;
pub use state::AppState;

use crate::task::ports::TaskRepository;
use axum::Router;
use axum::routing::{get, post};
use mockable::Clock;

/// Builds the application router over explicitly injected state.
#[must_use]
pub fn router<R, C>(state: AppState<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/tasks", post(handlers::create_task::<R, C>))
        .route("/tasks/pending", get(handlers::list_pending::<R, C>))
        .route("/tasks/history", get(handlers::list_history::<R, C>))
        .route("/tasks/{id}/approve", post(handlers::approve_task::<R, C>))
        .route("/tasks/{id}/cancel", post(handlers::cancel_task::<R, C>))
        .with_state(state)
}
