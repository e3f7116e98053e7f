//! Update ToDo Use Case
//!
//! Partial update of title, description, priority, due date and time.

use std::sync::Arc;

use account::AuthenticatedAccount;
use chrono::Utc;
use kernel::error::field_errors::FieldErrors;
use kernel::id::TodoId;

use crate::application::access::find_for_mutation;
use crate::application::config::TodoConfig;
use crate::domain::entities::{OwnedTodo, TodoChanges};
use crate::domain::repository::TodoRepository;
use crate::domain::value_objects::{DueDate, Priority, Title, parse_due_time};
use crate::error::{TodoError, TodoResult};

/// Update input; absent fields are left unchanged
#[derive(Default)]
pub struct UpdateTodoInput {
    pub title: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub time: Option<String>,
}

/// Update to-do use case
pub struct UpdateTodoUseCase<R>
where
    R: TodoRepository,
{
    repo: Arc<R>,
    config: Arc<TodoConfig>,
}

impl<R> UpdateTodoUseCase<R>
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
        input: UpdateTodoInput,
    ) -> TodoResult<OwnedTodo> {
        let mut todo = find_for_mutation(self.repo.as_ref(), todo_id, caller, &self.config).await?;

        let changes = validate(input)?;
        todo.item.apply(changes);

        self.repo.update(&todo.item).await?;

        tracing::info!(todo_id = %todo_id, account_id = %caller.account_id, "ToDo updated");

        Ok(todo)
    }
}

fn validate(input: UpdateTodoInput) -> TodoResult<TodoChanges> {
    let today = Utc::now().date_naive();
    let mut errors = FieldErrors::new();

    let changes = TodoChanges {
        title: input
            .title
            .and_then(|v| errors.check("title", Title::new(v))),
        description: input.description,
        priority: input
            .priority
            .and_then(|v| errors.check("priority", v.parse::<Priority>())),
        due_date: input
            .due_date
            .and_then(|v| errors.check("due_date", DueDate::parse(&v, today))),
        due_time: input
            .time
            .and_then(|v| errors.check("time", parse_due_time(&v))),
    };

    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(TodoError::Validation(errors))
    }
}
