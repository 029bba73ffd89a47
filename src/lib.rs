//! # Task API
//!
//! CRUD service for task records kept in an embedded document store.
//!
//! ## Architecture
//!
//! ```text
//!   HTTP ──► api (handlers) ──► usecase ──► repository ──► store
//!                                                          (SQLite, JSON documents)
//! ```
//!
//! `container` assembles the layers at startup by passing each one to the
//! constructor of the next.
//!
//! ## Modules
//! - `api`: axum routes, handlers, error mapping and API docs
//! - `usecase`: handler-facing trait over the repository
//! - `repository`: task persistence with per-call timeouts
//! - `store`: document collections on top of SQLite
//! - `task`: the Task record

pub mod api;
pub mod config;
pub mod container;
pub mod repository;
pub mod store;
pub mod task;
pub mod usecase;

pub use config::Config;
pub use container::Container;
pub use task::{Task, TaskInput};
