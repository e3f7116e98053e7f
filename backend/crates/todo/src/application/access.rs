//! Lookup shared by the mutating use cases

use account::AuthenticatedAccount;
use kernel::id::TodoId;

use crate::application::config::TodoConfig;
use crate::domain::entities::OwnedTodo;
use crate::domain::repository::TodoRepository;
use crate::error::{TodoError, TodoResult};

/// Load a to-do the caller is about to modify
///
/// With ownership enforced, another account's to-do is reported as missing.
pub(crate) async fn find_for_mutation<R>(
    repo: &R,
    todo_id: &TodoId,
    caller: &AuthenticatedAccount,
    config: &TodoConfig,
) -> TodoResult<OwnedTodo>
where
    R: TodoRepository,
{
    let todo = repo.find_by_id(todo_id).await?.ok_or(TodoError::NotFound)?;

    if config.enforce_ownership && !todo.item.is_owned_by(&caller.account_id) {
        tracing::warn!(
            todo_id = %todo_id,
            account_id = %caller.account_id,
            "Attempt to modify another account's to-do"
        );
        return Err(TodoError::NotFound);
    }

    Ok(todo)
}
