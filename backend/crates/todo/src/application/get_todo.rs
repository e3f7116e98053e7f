//! Get ToDo Use Case

use std::sync::Arc;

use kernel::id::TodoId;

use crate::domain::entities::OwnedTodo;
use crate::domain::repository::TodoRepository;
use crate::error::{TodoError, TodoResult};

/// Retrieve any to-do by id
pub struct GetTodoUseCase<R>
where
    R: TodoRepository,
{
    repo: Arc<R>,
}

impl<R> GetTodoUseCase<R>
where
    R: TodoRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, todo_id: &TodoId) -> TodoResult<OwnedTodo> {
        self.repo
            .find_by_id(todo_id)
            .await?
            .ok_or(TodoError::NotFound)
    }
}
