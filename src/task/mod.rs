//! Task module - the single domain entity of the API.

pub mod task;

pub use task::{Task, TaskDocument, TaskId, TaskInput};
