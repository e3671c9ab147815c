//! Task persistence: the storage capability and its file-backed and
//! in-memory implementations.
//!
//! [`FileStore`] is the production store. The full task list lives in a
//! single JSON file, and every mutation is a read-modify-write of the
//! whole list; the cycle is serialized behind a mutex so concurrent
//! requests cannot interleave and lose updates. [`MemoryStore`] implements
//! the same contract against a plain `Vec` for tests and embedding.

use std::path::{Path, PathBuf};

use taskboard_proto::task::{Task, TaskId};
use tokio::sync::Mutex;

/// Errors that can occur during task store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The task description was empty or whitespace-only.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The backing file is missing or could not be read.
    #[error("failed to read tasks file {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The backing file could not be written.
    #[error("failed to write tasks file {path}: {source}")]
    Write {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The backing file does not contain a valid JSON task list.
    #[error("tasks file {path} is not a valid task list: {source}")]
    Malformed {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// The task list could not be serialized.
    #[error("failed to serialize task list: {0}")]
    Serialize(serde_json::Error),
}

/// Storage capability for the authoritative task list.
///
/// The API layer depends on this trait rather than a concrete store, so
/// requests can be served by the file-backed [`FileStore`] in production
/// and by [`MemoryStore`] in tests.
pub trait TaskStore: Send + Sync {
    /// Loads the full task list in stored order.
    fn load_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Task>, StoreError>> + Send;

    /// Validates and appends a new task, returning it with its assigned id.
    ///
    /// The new id is the last element's id plus one, or 1 for an empty
    /// list.
    fn append(
        &self,
        description: &str,
    ) -> impl std::future::Future<Output = Result<Task, StoreError>> + Send;

    /// Removes the first task with the given id.
    ///
    /// Returns `true` when a task was removed. The stored list is only
    /// rewritten when a removal actually occurred.
    fn remove_by_id(
        &self,
        id: TaskId,
    ) -> impl std::future::Future<Output = Result<bool, StoreError>> + Send;
}

/// Computes the id for a task appended to `tasks`.
///
/// Derived from the last element only, not the maximum ever issued:
/// deleting the tail task and appending again issues the same id a second
/// time. Kept as-is for compatibility with existing stored lists.
fn next_id(tasks: &[Task]) -> TaskId {
    tasks.last().map_or_else(TaskId::first, |task| task.id.next())
}

/// Rejects empty and whitespace-only descriptions.
fn validate_description(description: &str) -> Result<(), StoreError> {
    if description.trim().is_empty() {
        return Err(StoreError::EmptyDescription);
    }
    Ok(())
}

/// File-backed task store.
///
/// The entire list is serialized as one JSON array and every write
/// replaces the whole file. Writes go to a sibling tmp file and are
/// renamed over the target, so a partially written list is never
/// observable.
pub struct FileStore {
    path: PathBuf,
    /// Serializes load-modify-persist cycles across concurrent requests.
    cycle: Mutex<()>,
}

impl FileStore {
    /// Creates a store backed by the JSON file at `path`.
    ///
    /// The file is not touched until the first operation; call
    /// [`Self::ensure_exists`] at startup to seed an empty list.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cycle: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seeds the backing file with an empty list if it does not exist.
    ///
    /// Existing file contents are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the file's existence cannot be
    /// determined, or [`StoreError::Write`] if the seed write fails.
    pub async fn ensure_exists(&self) -> Result<(), StoreError> {
        let _guard = self.cycle.lock().await;
        match tokio::fs::try_exists(&self.path).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                tracing::info!(path = %self.path.display(), "seeding empty tasks file");
                self.write_list(&[]).await
            }
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Reads and parses the full task list from the backing file.
    async fn read_list(&self) -> Result<Vec<Task>, StoreError> {
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| StoreError::Read {
                    path: self.path.clone(),
                    source,
                })?;
        serde_json::from_str(&contents).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Replaces the backing file with the serialized `tasks`.
    async fn write_list(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let json = serde_json::to_string(tasks).map_err(StoreError::Serialize)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|source| StoreError::Write {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })
    }
}

impl TaskStore for FileStore {
    async fn load_all(&self) -> Result<Vec<Task>, StoreError> {
        let _guard = self.cycle.lock().await;
        self.read_list().await
    }

    async fn append(&self, description: &str) -> Result<Task, StoreError> {
        validate_description(description)?;

        let _guard = self.cycle.lock().await;
        let mut tasks = self.read_list().await?;
        let task = Task::new(next_id(&tasks), description);
        tasks.push(task.clone());
        self.write_list(&tasks).await?;
        Ok(task)
    }

    async fn remove_by_id(&self, id: TaskId) -> Result<bool, StoreError> {
        let _guard = self.cycle.lock().await;
        let mut tasks = self.read_list().await?;
        let Some(index) = tasks.iter().position(|task| task.id == id) else {
            return Ok(false);
        };
        tasks.remove(index);
        self.write_list(&tasks).await?;
        Ok(true)
    }
}

/// In-memory task store for tests and embedding.
///
/// Same id-assignment and validation semantics as [`FileStore`], backed by
/// a `Vec` behind a [`parking_lot::RwLock`]. Never fails with I/O errors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: parking_lot::RwLock<Vec<Task>>,
}

impl MemoryStore {
    /// Creates a new, empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `tasks`.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: parking_lot::RwLock::new(tasks),
        }
    }
}

impl TaskStore for MemoryStore {
    async fn load_all(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.tasks.read().clone())
    }

    async fn append(&self, description: &str) -> Result<Task, StoreError> {
        validate_description(description)?;

        let mut tasks = self.tasks.write();
        let task = Task::new(next_id(&tasks), description);
        tasks.push(task.clone());
        Ok(task)
    }

    async fn remove_by_id(&self, id: TaskId) -> Result<bool, StoreError> {
        let mut tasks = self.tasks.write();
        let Some(index) = tasks.iter().position(|task| task.id == id) else {
            return Ok(false);
        };
        tasks.remove(index);
        Ok(true)
    }
}
