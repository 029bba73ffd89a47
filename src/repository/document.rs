//! Document-store task repository.

use super::{parse_id, with_timeout, RepositoryError, TaskRepository, Timeouts};
use crate::store::{Collection, StoreError};
use crate::task::{Task, TaskDocument, TaskInput};
use async_trait::async_trait;

/// Name of the collection holding task documents.
pub const TASKS_COLLECTION: &str = "tasks";

pub struct DocumentTaskRepository {
    collection: Collection,
    timeouts: Timeouts,
}

impl DocumentTaskRepository {
    pub fn new(collection: Collection, timeouts: Timeouts) -> Self {
        Self {
            collection,
            timeouts,
        }
    }
}

fn to_document<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, RepositoryError> {
    serde_json::to_value(value).map_err(|e| StoreError::Encode(e.to_string()).into())
}

#[async_trait]
impl TaskRepository for DocumentTaskRepository {
    async fn create(&self, input: TaskInput) -> Result<String, RepositoryError> {
        let doc = to_document(&TaskDocument::create(input))?;

        let id = with_timeout("create", self.timeouts.write, async {
            self.collection
                .insert_one(&doc)
                .await
                .map_err(RepositoryError::from)
        })
        .await?;

        tracing::debug!(collection = self.collection.name(), %id, "Inserted task");
        Ok(id.to_string())
    }

    async fn get_all(&self) -> Result<Vec<Task>, RepositoryError> {
        let docs = with_timeout("get_all", self.timeouts.read, async {
            self.collection
                .find_all()
                .await
                .map_err(RepositoryError::from)
        })
        .await?;

        docs.into_iter()
            .map(|(id, value)| {
                serde_json::from_value::<TaskDocument>(value)
                    .map(|doc| doc.into_task(id))
                    .map_err(|e| RepositoryError::Decode {
                        id,
                        message: e.to_string(),
                    })
            })
            .collect()
    }

    async fn update(&self, id: &str, input: TaskInput) -> Result<(), RepositoryError> {
        let key = parse_id(id)?;
        // Only the mutable fields; created_at stays as stored.
        let fields = to_document(&input)?;

        let matched = with_timeout("update", self.timeouts.write, async {
            self.collection
                .update_one(key, &fields)
                .await
                .map_err(RepositoryError::from)
        })
        .await?;

        if matched == 0 {
            return Err(RepositoryError::NotFound(key));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let key = parse_id(id)?;

        let deleted = with_timeout("delete", self.timeouts.write, async {
            self.collection
                .delete_one(key)
                .await
                .map_err(RepositoryError::from)
        })
        .await?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound(key));
        }
        Ok(())
    }
}
