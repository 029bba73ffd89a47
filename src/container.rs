//! Composition root.
//!
//! Builds the object graph once at startup, leaves first:
//!
//! ```text
//! Database ──► DocumentTaskRepository ──► TaskService ──► AppState ──► Router
//!   (store)        (repository)            (usecase)       (api)
//! ```
//!
//! Any failure here is returned to the caller and is fatal for the process.

use std::sync::Arc;

use axum::Router;

use crate::api::routes::{self, AppState};
use crate::config::Config;
use crate::repository::{
    DocumentTaskRepository, InMemoryTaskRepository, TaskRepository, TaskStoreType,
    TASKS_COLLECTION,
};
use crate::store::{Database, StoreError};
use crate::usecase::{TaskService, TaskUseCaseRef};

/// The assembled application.
pub struct Container {
    state: Arc<AppState>,
}

impl Container {
    /// Open the configured store and wire every layer above it.
    pub async fn build(config: &Config) -> Result<Self, StoreError> {
        let repository: Arc<dyn TaskRepository> = match config.store_type {
            TaskStoreType::Memory => {
                tracing::info!("Using in-memory task store");
                Arc::new(InMemoryTaskRepository::new())
            }
            TaskStoreType::Document => {
                let database = Database::open(&config.database_url).await?;
                tracing::info!("Connected to document store at {}", config.database_url);
                Arc::new(DocumentTaskRepository::new(
                    database.collection(TASKS_COLLECTION),
                    config.timeouts,
                ))
            }
        };

        Ok(Self::with_repository(repository))
    }

    /// Wire the use case and handler layers above an existing repository.
    pub fn with_repository(repository: Arc<dyn TaskRepository>) -> Self {
        let tasks: TaskUseCaseRef = Arc::new(TaskService::new(repository));
        Self {
            state: Arc::new(AppState { tasks }),
        }
    }

    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// HTTP routes over the assembled state.
    pub fn router(&self) -> Router {
        routes::router(self.state())
    }
}
