//! Core task data model shared between the server and its wire payloads.

use serde::{Deserialize, Serialize};

/// Unique identifier for a task.
///
/// Ids are positive integers assigned by the store: the first task of an
/// empty list gets id 1, and every appended task gets the id of the list's
/// last element plus one. Serializes as a plain JSON integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a task id from a raw integer value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The id assigned to the first task appended to an empty list.
    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }

    /// The id assigned to a task appended directly after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unit of work: a unique id plus a human-readable description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique, store-assigned identifier.
    pub id: TaskId,
    /// Free-form description; never empty for a stored task.
    pub description: String,
}

impl Task {
    /// Creates a task from an id and a description.
    #[must_use]
    pub fn new(id: TaskId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }
}
