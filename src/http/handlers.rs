//! Request handlers for the task routes.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use super::{error::ApiError, router::AppState};
use crate::task::{
    domain::{Task, TaskId, TaskTitle},
    services::{CreateTaskRequest, EditTaskRequest},
};

/// Body accepted by the create and edit routes.
///
/// Both fields are optional on the wire so a missing title is reported as
/// a validation failure rather than a malformed body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPayload {
    /// Task title; must contain a non-whitespace character.
    #[serde(default)]
    pub title: Option<String>,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of confirmations and errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    /// Human-readable message.
    pub message: String,
}

impl MessageBody {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_owned(),
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct HealthBody {
    status: &'static str,
}

type ApiResult<T> = Result<T, ApiError>;

fn parse_task_id(raw: &str) -> ApiResult<TaskId> {
    raw.parse::<TaskId>().map_err(ApiError::from)
}

/// `GET /api/tasks`
pub(super) async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.tasks.list_recent().await?;
    Ok(Json(tasks))
}

/// `POST /api/tasks`
pub(super) async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let Json(body) = payload?;
    let mut request = CreateTaskRequest::new(body.title.unwrap_or_default());
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    let task = state.tasks.create(request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PUT /api/tasks/{id}`
///
/// The body is validated before the id, so a blank title is a 400 even on an
/// unknown task.
pub(super) async fn edit_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Json(body) = payload?;
    let title = TaskTitle::new(body.title.unwrap_or_default())?;
    let id = parse_task_id(&raw_id)?;
    let mut request = EditTaskRequest::new(id, title);
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    let task = state.tasks.edit(request).await?;
    Ok(Json(task))
}

/// `PUT /api/tasks/{id}/complete`
pub(super) async fn complete_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    let id = parse_task_id(&raw_id)?;
    state.tasks.complete(id).await?;
    Ok(MessageBody::new("Task marked as complete"))
}

/// `DELETE /api/tasks/{id}`
pub(super) async fn delete_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    let id = parse_task_id(&raw_id)?;
    state.tasks.delete(id).await?;
    Ok(MessageBody::new("Task deleted"))
}

/// `GET /api/health`
pub(super) async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

pub(super) async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}
