//! Add ToDo Use Case

use std::sync::Arc;

use account::AuthenticatedAccount;
use chrono::Utc;
use kernel::error::field_errors::FieldErrors;

use crate::domain::entities::{OwnedTodo, TodoItem};
use crate::domain::repository::TodoRepository;
use crate::domain::value_objects::{DueDate, Priority, Title, parse_due_time};
use crate::error::{TodoError, TodoResult};

/// Add to-do input
///
/// Owner and completion state are never taken from the client.
#[derive(Default)]
pub struct AddTodoInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub time: Option<String>,
}

/// Add to-do use case
pub struct AddTodoUseCase<R>
where
    R: TodoRepository,
{
    repo: Arc<R>,
}

impl<R> AddTodoUseCase<R>
where
    R: TodoRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        caller: &AuthenticatedAccount,
        input: AddTodoInput,
    ) -> TodoResult<OwnedTodo> {
        let today = Utc::now().date_naive();
        let mut errors = FieldErrors::new();

        let title = errors
            .require("title", input.title)
            .and_then(|v| errors.check("title", Title::new(v)));
        let priority = match input.priority {
            Some(raw) => errors.check("priority", raw.parse::<Priority>()),
            None => Some(Priority::default()),
        };
        let due_date = errors
            .require("due_date", input.due_date)
            .and_then(|v| errors.check("due_date", DueDate::parse(&v, today)));
        let due_time = errors
            .require("time", input.time)
            .and_then(|v| errors.check("time", parse_due_time(&v)));

        let (Some(title), Some(priority), Some(due_date), Some(due_time)) =
            (title, priority, due_date, due_time)
        else {
            return Err(TodoError::Validation(errors));
        };

        let item = TodoItem::new(
            caller.account_id,
            title,
            input.description,
            priority,
            due_date,
            due_time,
        );

        self.repo.create(&item).await?;

        tracing::info!(
            todo_id = %item.id,
            account_id = %caller.account_id,
            "ToDo created"
        );

        Ok(OwnedTodo {
            item,
            owner_name: caller.display_name(),
        })
    }
}
