//! Delete ToDo Use Case

use std::sync::Arc;

use account::AuthenticatedAccount;
use kernel::id::TodoId;

use crate::application::access::find_for_mutation;
use crate::application::config::TodoConfig;
use crate::domain::repository::TodoRepository;
use crate::error::{TodoError, TodoResult};

/// Delete to-do use case
pub struct DeleteTodoUseCase<R>
where
    R: TodoRepository,
{
    repo: Arc<R>,
    config: Arc<TodoConfig>,
}

impl<R> DeleteTodoUseCase<R>
where
    R: TodoRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<TodoConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, caller: &AuthenticatedAccount, todo_id: &TodoId) -> TodoResult<()> {
        find_for_mutation(self.repo.as_ref(), todo_id, caller, &self.config).await?;

        // A concurrent delete may have won since the lookup
        if !self.repo.delete(todo_id).await? {
            return Err(TodoError::NotFound);
        }

        tracing::info!(todo_id = %todo_id, account_id = %caller.account_id, "ToDo deleted");

        Ok(())
    }
}
