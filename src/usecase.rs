//! Task use cases.
//!
//! Sits between the HTTP handlers and the repository so the handlers never
//! see the storage technology. Each method has the contract of the matching
//! [`TaskRepository`] method.

use async_trait::async_trait;
use std::sync::Arc;

use crate::repository::{RepositoryError, TaskRepository};
use crate::task::{Task, TaskInput};

#[async_trait]
pub trait TaskUseCase: Send + Sync {
    async fn create_task(&self, input: TaskInput) -> Result<String, RepositoryError>;
    async fn get_tasks(&self) -> Result<Vec<Task>, RepositoryError>;
    async fn update_task(&self, id: &str, input: TaskInput) -> Result<(), RepositoryError>;
    async fn delete_task(&self, id: &str) -> Result<(), RepositoryError>;
}

/// Shared reference to a use case implementation.
pub type TaskUseCaseRef = Arc<dyn TaskUseCase>;

pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl TaskUseCase for TaskService {
    async fn create_task(&self, input: TaskInput) -> Result<String, RepositoryError> {
        self.repository.create(input).await
    }

    async fn get_tasks(&self) -> Result<Vec<Task>, RepositoryError> {
        self.repository.get_all().await
    }

    async fn update_task(&self, id: &str, input: TaskInput) -> Result<(), RepositoryError> {
        self.repository.update(id, input).await
    }

    async fn delete_task(&self, id: &str) -> Result<(), RepositoryError> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryTaskRepository;

    #[tokio::test]
    async fn test_service_delegates_to_repository() {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let service = TaskService::new(repository.clone());

        let id = service.create_task(TaskInput::new("buy milk")).await.unwrap();
        assert_eq!(repository.get_all().await.unwrap()[0].id.to_string(), id);

        service
            .update_task(&id, TaskInput::new("buy bread"))
            .await
            .unwrap();
        assert_eq!(service.get_tasks().await.unwrap()[0].title, "buy bread");

        service.delete_task(&id).await.unwrap();
        assert!(repository.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_service_passes_errors_through() {
        let service = TaskService::new(Arc::new(InMemoryTaskRepository::new()));
        assert!(matches!(
            service.delete_task("bogus").await,
            Err(RepositoryError::InvalidId(_))
        ));
    }
}
