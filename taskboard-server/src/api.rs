//! HTTP API: translates requests into task store calls and JSON responses.
//!
//! Domain outcomes (validation failures, missing delete targets) are
//! reported as HTTP 200 with a payload-encoded success flag, matching the
//! wire contract the browser client was written against. Only storage
//! failures surface as 500.

use std::path::Path;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use taskboard_proto::wire::{
    CreateTaskRequest, DeleteTaskRequest, MutationResponse, TaskListResponse,
};
use tower_http::services::ServeDir;

use crate::store::{StoreError, TaskStore};

/// Shared API state holding the injected task store.
pub struct ApiState<S> {
    /// Authoritative task storage.
    pub store: S,
}

impl<S> ApiState<S> {
    /// Creates API state around a task store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }
}

/// A storage failure surfaced through a request handler.
///
/// Converted into a 500 response with a JSON body; the underlying error is
/// logged rather than leaked to the client.
#[derive(Debug)]
pub struct ApiError(StoreError);

impl From<StoreError> for ApiError {
    fn from(source: StoreError) -> Self {
        Self(source)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "storage failure while handling request");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MutationResponse::failure("Internal storage error.")),
        )
            .into_response()
    }
}

/// Handles `GET /tasks`: the full task list in stored order.
async fn list_tasks<S: TaskStore>(
    State(state): State<Arc<ApiState<S>>>,
) -> Result<Json<TaskListResponse>, ApiError> {
    let tasks = state.store.load_all().await?;
    tracing::debug!(count = tasks.len(), "listing tasks");
    Ok(Json(TaskListResponse::new(tasks)))
}

/// Handles `POST /tasks`: appends a new task with the next id.
async fn create_task<S: TaskStore>(
    State(state): State<Arc<ApiState<S>>>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    if request.description.trim().is_empty() {
        tracing::debug!("rejected task with empty description");
        return Ok(Json(MutationResponse::failure("Task not added.")));
    }

    match state.store.append(&request.description).await {
        Ok(task) => {
            tracing::info!(id = %task.id, "task added");
            Ok(Json(MutationResponse::success("Task added.")))
        }
        // The store enforces the same validation contract; map its
        // rejection to the identical wire response.
        Err(StoreError::EmptyDescription) => {
            Ok(Json(MutationResponse::failure("Task not added.")))
        }
        Err(e) => Err(e.into()),
    }
}

/// Handles `DELETE /tasks`: removes a task by id.
async fn delete_task<S: TaskStore>(
    State(state): State<Arc<ApiState<S>>>,
    Json(request): Json<DeleteTaskRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let Some(id) = request.id else {
        return Ok(Json(MutationResponse::failure("Task not found.")));
    };

    if state.store.remove_by_id(id).await? {
        tracing::info!(id = %id, "task deleted");
        Ok(Json(MutationResponse::success("Task deleted.")))
    } else {
        tracing::debug!(id = %id, "delete target not found");
        Ok(Json(MutationResponse::failure("Task not found.")))
    }
}

/// Builds the application router: the task API plus static client assets.
///
/// Every path other than `/tasks` falls through to the static file
/// service rooted at `static_dir`.
pub fn router<S: TaskStore + 'static>(state: Arc<ApiState<S>>, static_dir: &Path) -> axum::Router {
    axum::Router::new()
        .route(
            "/tasks",
            get(list_tasks::<S>)
                .post(create_task::<S>)
                .delete(delete_task::<S>),
        )
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

/// Starts the server on `addr` with the given state, returning the bound
/// address and a join handle.
///
/// This is the primary entry point used by both `main.rs` and test code;
/// binding to port 0 yields an OS-assigned port in the returned address.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state<S: TaskStore + 'static>(
    addr: &str,
    state: Arc<ApiState<S>>,
    static_dir: &Path,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state, static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "server error");
        }
    });

    Ok((bound_addr, handle))
}
