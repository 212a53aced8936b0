//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates. Ids are
//! opaque to the client, so `TodoId` wraps the server's string verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-issued identifier of a todo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub content: String,
    pub completed: bool,
}

/// Response wrapper used by every endpoint.
///
/// `data` is only present on successful list responses; `message` is empty
/// on success and carries the reason on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Request payload for `/add_todo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTodo {
    pub content: String,
}

/// Request payload for `/update_todo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub todo_id: TodoId,
    pub content: String,
}

/// Request payload for `/toggle_todo` and `/remove_todo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoRef {
    pub todo_id: TodoId,
}
