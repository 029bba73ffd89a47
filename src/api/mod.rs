//! HTTP API for the task service.
//!
//! ## Endpoints
//!
//! - `GET /` - Greeting
//! - `POST /tasks` - Create a task
//! - `GET /tasks` - List all tasks
//! - `PUT /tasks/{id}` - Update a task
//! - `DELETE /tasks/{id}` - Delete a task
//! - `GET /swagger/doc.json` - OpenAPI document
//! - `GET /swagger/index.html` - Swagger UI

pub mod docs;
pub mod error;
pub mod routes;
pub mod tasks;
pub mod types;

pub use error::ApiError;
pub use routes::{serve, AppState};
pub use types::*;
