//! List ToDos Use Case

use std::sync::Arc;

use account::AuthenticatedAccount;

use crate::domain::entities::OwnedTodo;
use crate::domain::repository::TodoRepository;
use crate::error::TodoResult;

/// List the caller's to-dos, newest first
pub struct ListTodosUseCase<R>
where
    R: TodoRepository,
{
    repo: Arc<R>,
}

impl<R> ListTodosUseCase<R>
where
    R: TodoRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, caller: &AuthenticatedAccount) -> TodoResult<Vec<OwnedTodo>> {
        self.repo.list_by_owner(&caller.account_id).await
    }
}
