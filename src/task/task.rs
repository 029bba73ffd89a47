//! Core Task record.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never changes afterwards
//! - `created_at` is stamped by the server on create and preserved on update

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Store key of a task.
pub type TaskId = Uuid;

/// A persisted task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[schema(value_type = String, format = Uuid)]
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Client-supplied mutable fields of a task.
///
/// Used both for create and for the full replace done by update. An `id` or
/// `createdAt` in the request body is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TaskInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl TaskInput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            completed: false,
        }
    }
}

/// Stored document body: everything but the key, which lives beside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDocument {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl TaskDocument {
    /// Build a fresh document, stamping the creation time.
    pub fn create(input: TaskInput) -> Self {
        Self {
            title: input.title,
            description: input.description,
            completed: input.completed,
            created_at: Utc::now(),
        }
    }

    /// Replace the mutable fields, keeping `created_at`.
    pub fn replace(&mut self, input: TaskInput) {
        self.title = input.title;
        self.description = input.description;
        self.completed = input.completed;
    }

    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            created_at: self.created_at,
        }
    }
}
