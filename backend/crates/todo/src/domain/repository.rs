//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{AccountId, TodoId};

use crate::domain::entities::{OwnedTodo, TodoItem};
use crate::error::TodoResult;

/// To-do repository trait
#[trait_variant::make(TodoRepository: Send)]
pub trait LocalTodoRepository {
    /// Create a new to-do
    async fn create(&self, todo: &TodoItem) -> TodoResult<()>;

    /// Find a to-do by ID, whoever owns it
    async fn find_by_id(&self, todo_id: &TodoId) -> TodoResult<Option<OwnedTodo>>;

    /// All to-dos of one owner, most recently created first
    async fn list_by_owner(&self, owner_id: &AccountId) -> TodoResult<Vec<OwnedTodo>>;

    /// Persist the mutable fields of a to-do
    async fn update(&self, todo: &TodoItem) -> TodoResult<()>;

    /// Delete a to-do; returns whether a row was removed
    async fn delete(&self, todo_id: &TodoId) -> TodoResult<bool>;
}
