//! In-memory task repository (non-persistent).

use super::{parse_id, RepositoryError, TaskRepository};
use crate::task::{Task, TaskDocument, TaskId, TaskInput};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryTaskRepository {
    // Insertion order is the list order.
    tasks: Arc<RwLock<Vec<(TaskId, TaskDocument)>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, input: TaskInput) -> Result<String, RepositoryError> {
        let id = TaskId::new_v4();
        self.tasks
            .write()
            .await
            .push((id, TaskDocument::create(input)));
        Ok(id.to_string())
    }

    async fn get_all(&self) -> Result<Vec<Task>, RepositoryError> {
        Ok(self
            .tasks
            .read()
            .await
            .iter()
            .map(|(id, doc)| doc.clone().into_task(*id))
            .collect())
    }

    async fn update(&self, id: &str, input: TaskInput) -> Result<(), RepositoryError> {
        let key = parse_id(id)?;
        let mut tasks = self.tasks.write().await;
        let (_, doc) = tasks
            .iter_mut()
            .find(|(id, _)| *id == key)
            .ok_or(RepositoryError::NotFound(key))?;
        doc.replace(input);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let key = parse_id(id)?;
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|(id, _)| *id != key);
        if tasks.len() == before {
            return Err(RepositoryError::NotFound(key));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lists_in_insertion_order() {
        let repo = InMemoryTaskRepository::new();
        let first = repo.create(TaskInput::new("first")).await.unwrap();
        let second = repo.create(TaskInput::new("second")).await.unwrap();

        let ids: Vec<String> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[tokio::test]
    async fn test_update_and_delete_lifecycle() {
        let repo = InMemoryTaskRepository::new();
        let id = repo.create(TaskInput::new("buy milk")).await.unwrap();

        repo.update(&id, TaskInput::new("buy bread")).await.unwrap();
        assert_eq!(repo.get_all().await.unwrap()[0].title, "buy bread");

        repo.delete(&id).await.unwrap();
        assert!(repo.get_all().await.unwrap().is_empty());
        assert!(matches!(
            repo.delete(&id).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_and_malformed_ids() {
        let repo = InMemoryTaskRepository::new();
        let missing = TaskId::new_v4().to_string();

        assert!(matches!(
            repo.update(&missing, TaskInput::new("x")).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.update("123", TaskInput::new("x")).await,
            Err(RepositoryError::InvalidId(_))
        ));
        assert!(repo.get_all().await.unwrap().is_empty());
    }
}
