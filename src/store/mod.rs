//! Embedded document store.
//!
//! Documents are JSON objects grouped into named collections and keyed by a
//! store-generated UUID. Everything lives in a single SQLite database:
//!
//! ```text
//! documents
//! ├── seq         INTEGER  insertion order
//! ├── collection  TEXT     e.g. "tasks"
//! ├── id          TEXT     store key (UUID v4)
//! └── body        TEXT     JSON document
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let db = Database::open("taskdb.sqlite").await?;
//! let tasks = db.collection("tasks");
//!
//! let id = tasks.insert_one(&serde_json::json!({ "title": "buy milk" })).await?;
//! let matched = tasks.update_one(id, &serde_json::json!({ "title": "buy bread" })).await?;
//! let deleted = tasks.delete_one(id).await?;
//! ```

use rusqlite::{params, Connection};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

const SCHEMA: &str = r#"
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS documents (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    collection TEXT NOT NULL,
    id TEXT NOT NULL,
    body TEXT NOT NULL,
    UNIQUE (collection, id)
);

CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection, seq);
"#;

/// Connection string selecting a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to open database {path}: {message}")]
    Open { path: String, message: String },

    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Failed to encode document: {0}")]
    Encode(String),

    #[error("Corrupt document {id}: {message}")]
    Decode { id: String, message: String },

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// An open database. Cheap to clone; all clones share one connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (creating if needed) the database named by `url`.
    ///
    /// `url` is a filesystem path, optionally prefixed with `sqlite://`, or
    /// [`IN_MEMORY`].
    pub async fn open(url: &str) -> Result<Self, StoreError> {
        let path = url.strip_prefix("sqlite://").unwrap_or(url).to_string();

        if path != IN_MEMORY {
            if let Some(parent) = Path::new(&path).parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| StoreError::Open {
                            path: path.clone(),
                            message: e.to_string(),
                        })?;
                }
            }
        }

        let conn = tokio::task::spawn_blocking(move || {
            let conn = if path == IN_MEMORY {
                Connection::open_in_memory()
            } else {
                Connection::open(&path)
            }
            .map_err(|e| StoreError::Open {
                path: path.clone(),
                message: e.to_string(),
            })?;

            conn.execute_batch(SCHEMA).map_err(|e| StoreError::Open {
                path: path.clone(),
                message: format!("failed to run schema: {}", e),
            })?;

            Ok::<_, StoreError>(conn)
        })
        .await??;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Handle to the named collection.
    pub fn collection(&self, name: &str) -> Collection {
        Collection {
            conn: Arc::clone(&self.conn),
            name: Arc::from(name),
        }
    }
}

/// Handle to one collection of documents.
#[derive(Clone)]
pub struct Collection {
    conn: Arc<Mutex<Connection>>,
    name: Arc<str>,
}

impl Collection {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert a document under a freshly generated key and return the key.
    pub async fn insert_one(&self, doc: &Value) -> Result<Uuid, StoreError> {
        let conn = self.conn.clone();
        let name = Arc::clone(&self.name);
        let body = encode(doc)?;
        let id = Uuid::new_v4();

        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            conn.execute(
                "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)",
                params![&*name, id.to_string(), body],
            )?;
            Ok::<_, StoreError>(id)
        })
        .await?
    }

    /// All documents in insertion order.
    pub async fn find_all(&self) -> Result<Vec<(Uuid, Value)>, StoreError> {
        let conn = self.conn.clone();
        let name = Arc::clone(&self.name);

        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            let mut stmt =
                conn.prepare("SELECT id, body FROM documents WHERE collection = ?1 ORDER BY seq")?;
            let rows = stmt
                .query_map(params![&*name], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                })?
                .collect::<Result<Vec<_>, _>>()?;

            rows.into_iter()
                .map(|(id, body)| {
                    let key = Uuid::parse_str(&id).map_err(|e| StoreError::Decode {
                        id: id.clone(),
                        message: e.to_string(),
                    })?;
                    let value: Value =
                        serde_json::from_str(&body).map_err(|e| StoreError::Decode {
                            id: id.clone(),
                            message: e.to_string(),
                        })?;
                    Ok((key, value))
                })
                .collect::<Result<Vec<_>, StoreError>>()
        })
        .await?
    }

    /// Merge `fields` into the document with key `id` (top-level keys are
    /// overwritten, others kept). Returns the number of matched documents.
    pub async fn update_one(&self, id: Uuid, fields: &Value) -> Result<u64, StoreError> {
        let conn = self.conn.clone();
        let name = Arc::clone(&self.name);
        let patch = encode(fields)?;

        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            let matched = conn.execute(
                "UPDATE documents SET body = json_patch(body, ?3)
                 WHERE collection = ?1 AND id = ?2",
                params![&*name, id.to_string(), patch],
            )?;
            Ok::<_, StoreError>(matched as u64)
        })
        .await?
    }

    /// Remove the document with key `id`. Returns the number of deleted documents.
    pub async fn delete_one(&self, id: Uuid) -> Result<u64, StoreError> {
        let conn = self.conn.clone();
        let name = Arc::clone(&self.name);

        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            let deleted = conn.execute(
                "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
                params![&*name, id.to_string()],
            )?;
            Ok::<_, StoreError>(deleted as u64)
        })
        .await?
    }
}

fn encode(doc: &Value) -> Result<String, StoreError> {
    if !doc.is_object() {
        return Err(StoreError::Encode("document must be a JSON object".to_string()));
    }
    serde_json::to_string(doc).map_err(|e| StoreError::Encode(e.to_string()))
}
