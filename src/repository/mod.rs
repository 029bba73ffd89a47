//! Task storage with pluggable backends.
//!
//! Supports:
//! - `document`: tasks collection in the embedded document store
//! - `memory`: In-memory storage (non-persistent, for testing)
//!
//! Every operation takes the identifier as the client sent it; a value that
//! is not a well-formed store key is reported as [`RepositoryError::InvalidId`]
//! without touching the store.

mod document;
mod memory;

pub use document::{DocumentTaskRepository, TASKS_COLLECTION};
pub use memory::InMemoryTaskRepository;

use crate::store::StoreError;
use crate::task::{Task, TaskId, TaskInput};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The identifier is not a well-formed store key.
    #[error("Invalid task id '{0}'")]
    InvalidId(String),

    /// No task matched the identifier.
    #[error("Task {0} not found")]
    NotFound(TaskId),

    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A stored document could not be read back as a task.
    #[error("Corrupt task {id}: {message}")]
    Decode { id: TaskId, message: String },
}

impl RepositoryError {
    /// Whether the caller, not the store, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidId(_) | Self::NotFound(_))
    }
}

/// Per-operation deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Create, update and delete.
    pub write: Duration,
    /// List.
    pub read: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            write: Duration::from_secs(5),
            read: Duration::from_secs(10),
        }
    }
}

/// Task repository trait - implemented by all storage backends.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task and return its generated identifier.
    async fn create(&self, input: TaskInput) -> Result<String, RepositoryError>;

    /// Every stored task, oldest first. An empty store yields an empty vector.
    async fn get_all(&self) -> Result<Vec<Task>, RepositoryError>;

    /// Replace the mutable fields of the task with the given identifier.
    async fn update(&self, id: &str, input: TaskInput) -> Result<(), RepositoryError>;

    /// Remove the task with the given identifier.
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}

/// Parse a client-supplied identifier into a store key.
pub fn parse_id(id: &str) -> Result<TaskId, RepositoryError> {
    TaskId::parse_str(id).map_err(|_| RepositoryError::InvalidId(id.to_string()))
}

/// Run `fut`, failing with [`RepositoryError::Timeout`] once `after` elapses.
pub async fn with_timeout<T, F>(
    operation: &'static str,
    after: Duration,
    fut: F,
) -> Result<T, RepositoryError>
where
    F: Future<Output = Result<T, RepositoryError>>,
{
    match tokio::time::timeout(after, fut).await {
        Ok(result) => result,
        Err(_) => Err(RepositoryError::Timeout { operation, after }),
    }
}

/// Task store type selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStoreType {
    Memory,
    #[default]
    Document,
}

impl TaskStoreType {
    /// Parse from environment variable value.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" => Self::Memory,
            "document" | "sqlite" | "db" => Self::Document,
            _ => Self::default(),
        }
    }
}
