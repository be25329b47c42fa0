use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use tasklist_model::{Health, TaskPatch, Version, normalize_title};

use crate::{error::ApiError, handler::TaskHandler};

/// Version reported by `GET /api/version`.
pub const API_VERSION: &str = "1.0.0";

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
}

impl<H> HttpApi<H>
where
    H: TaskHandler,
{
    /// Create new HTTP API with the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - GET /                  - Service banner
    /// - GET /health            - Liveness check
    /// - GET /api/version       - API version
    /// - GET /api/tasks         - List tasks
    /// - POST /api/tasks        - Create task
    /// - PATCH /api/tasks/{id}  - Update title and/or completion (PUT is an alias)
    /// - DELETE /api/tasks/{id} - Delete task
    pub fn router(self) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/health", get(health))
            .route("/api/version", get(version))
            .route("/api/tasks", get(list_tasks::<H>).post(create_task::<H>))
            .route(
                "/api/tasks/{id}",
                patch(update_task::<H>)
                    .put(update_task::<H>)
                    .delete(delete_task::<H>),
            )
            .with_state(self.handler)
    }
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct CreateTaskRequest {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Serialize)]
struct IndexResponse {
    message: &'static str,
    endpoints: [&'static str; 3],
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
async fn index() -> impl IntoResponse {
    Json(IndexResponse {
        message: "ToDo API is running",
        endpoints: ["/health", "/api/version", "/api/tasks"],
    })
}

/// GET /health
async fn health() -> impl IntoResponse {
    Json(Health::healthy())
}

/// GET /api/version
async fn version() -> impl IntoResponse {
    Json(Version {
        version: API_VERSION.to_string(),
    })
}

/// GET /api/tasks
async fn list_tasks<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: TaskHandler,
{
    let tasks = handler.list_tasks().await?;
    debug!(count = tasks.len(), "tasks listed");

    Ok(Json(tasks))
}

/// POST /api/tasks
async fn create_task<H>(
    State(handler): State<Arc<H>>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    H: TaskHandler,
{
    let Json(req) = payload?;
    let title = req
        .title
        .as_deref()
        .and_then(normalize_title)
        .ok_or_else(|| ApiError::InvalidRequest("title is required".into()))?;

    let task = handler.create_task(title).await?;
    debug!(id = %task.id, "task created");

    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /api/tasks/{id}
async fn update_task<H>(
    State(handler): State<Arc<H>>,
    Path(id): Path<String>,
    payload: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    H: TaskHandler,
{
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    let task = handler.update_task(id, patch).await?;
    debug!(id, is_done = task.is_done, "task updated");

    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
async fn delete_task<H>(
    State(handler): State<Arc<H>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    H: TaskHandler,
{
    let id = parse_id(&id)?;
    handler.delete_task(id).await?;
    debug!(id, "task deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Ids are numeric; anything else cannot name a stored task.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::TaskNotFound(raw.to_string()))
}
