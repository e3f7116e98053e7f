//! Complete ToDo Use Case

use std::sync::Arc;

use account::AuthenticatedAccount;
use kernel::id::TodoId;

use crate::application::access::find_for_mutation;
use crate::application::config::TodoConfig;
use crate::domain::entities::OwnedTodo;
use crate::domain::repository::TodoRepository;
use crate::error::TodoResult;

/// Mark a to-do as completed (idempotent)
pub struct CompleteTodoUseCase<R>
where
    R: TodoRepository,
{
    repo: Arc<R>,
    config: Arc<TodoConfig>,
}

impl<R> CompleteTodoUseCase<R>
where
    R: TodoRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<TodoConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        caller: &AuthenticatedAccount,
        todo_id: &TodoId,
    ) -> TodoResult<OwnedTodo> {
        let mut todo = find_for_mutation(self.repo.as_ref(), todo_id, caller, &self.config).await?;

        todo.item.mark_completed();
        self.repo.update(&todo.item).await?;

        tracing::info!(todo_id = %todo_id, account_id = %caller.account_id, "ToDo completed");

        Ok(todo)
    }
}
