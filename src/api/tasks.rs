//! Task management API endpoints.
//!
//! - `POST /tasks` - Create a task
//! - `GET /tasks` - List all tasks
//! - `PUT /tasks/:id` - Replace a task's mutable fields
//! - `DELETE /tasks/:id` - Delete a task

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use std::sync::Arc;

use super::error::ApiError;
use super::routes::AppState;
use super::types::{CreatedResponse, MessageResponse};
use crate::task::{Task, TaskInput};

/// Create task routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", get(get_tasks).post(create_task))
        // `/tasks/` never reaches `/tasks/:id`; answer it the same way a blank id is answered.
        .route("/tasks/", put(missing_id).delete(missing_id))
        .route("/tasks/:id", put(update_task).delete(delete_task))
}

fn require_id(id: &str) -> Result<&str, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::bad_request("id not sent"));
    }
    Ok(id)
}

/// Decode a task body as JSON, whatever the request's content type.
fn decode_input(body: Result<Bytes, BytesRejection>) -> Result<TaskInput, ApiError> {
    let body = body?;
    Ok(serde_json::from_slice(&body)?)
}

async fn missing_id() -> ApiError {
    ApiError::bad_request("id not sent")
}

/// POST /tasks - Create a new task.
#[utoipa::path(
    post,
    path = "/tasks",
    tag = "tasks",
    request_body = TaskInput,
    responses(
        (status = 201, description = "Task created", body = CreatedResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let input = decode_input(body)?;
    let id = state.tasks.create_task(input).await?;

    tracing::info!("Created task {}", id);

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET /tasks - List all tasks.
#[utoipa::path(
    get,
    path = "/tasks",
    tag = "tasks",
    responses(
        (status = 200, description = "All tasks, oldest first", body = [Task]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_tasks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(state.tasks.get_tasks().await?))
}

/// PUT /tasks/:id - Replace the mutable fields of a task.
#[utoipa::path(
    put,
    path = "/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task identifier")),
    request_body = TaskInput,
    responses(
        (status = 200, description = "Task updated", body = MessageResponse),
        (status = 400, description = "Missing/invalid id or malformed body", body = ErrorResponse),
        (status = 404, description = "No task with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = require_id(&id)?;
    let input = decode_input(body)?;

    state.tasks.update_task(id, input).await?;

    tracing::info!("Updated task {}", id);

    Ok(Json(MessageResponse::new("Task updated")))
}

/// DELETE /tasks/:id - Delete a task.
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task deleted", body = MessageResponse),
        (status = 400, description = "Missing or invalid id", body = ErrorResponse),
        (status = 404, description = "No task with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = require_id(&id)?;

    state.tasks.delete_task(id).await?;

    tracing::info!("Deleted task {}", id);

    Ok(Json(MessageResponse::new("Task deleted")))
}
