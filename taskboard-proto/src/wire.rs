//! Wire payload types for the task HTTP API.
//!
//! Field names here are the wire contract with the browser client,
//! including the capitalized `Items` key and the `success` flag that is
//! omitted rather than serialized as `false` when a mutation is rejected.
//! Renaming any of them breaks deployed clients.

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskId};

/// Response body for `GET /tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListResponse {
    /// The full task list in stored order.
    #[serde(rename = "Items")]
    pub items: Vec<Task>,
}

impl TaskListResponse {
    /// Wraps a task list for the wire.
    #[must_use]
    pub const fn new(items: Vec<Task>) -> Self {
        Self { items }
    }
}

/// Request body for `POST /tasks`.
///
/// A missing `description` field deserializes as the empty string so the
/// request takes the validation path instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Description of the task to create.
    #[serde(default)]
    pub description: String,
}

/// Request body for `DELETE /tasks`.
///
/// A missing `id` field deserializes as `None` and is reported as a
/// not-found outcome rather than a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTaskRequest {
    /// Id of the task to delete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
}

/// Response body for mutations (`POST /tasks` and `DELETE /tasks`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    /// Present and `true` only when the mutation was applied.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub success: bool,
    /// Human-readable outcome message.
    pub message: String,
}

impl MutationResponse {
    /// An applied mutation outcome.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A domain failure reported at HTTP 200.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
