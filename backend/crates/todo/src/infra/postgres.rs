//! PostgreSQL Repository Implementation

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use kernel::id::{AccountId, TodoId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{OwnedTodo, TodoItem};
use crate::domain::repository::TodoRepository;
use crate::domain::value_objects::{DueDate, Priority, Title};
use crate::error::{TodoError, TodoResult};

/// PostgreSQL-backed to-do repository
#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TodoRepository for PgTodoRepository {
    async fn create(&self, todo: &TodoItem) -> TodoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO todos (
                todo_id,
                owner_id,
                title,
                description,
                priority,
                due_date,
                due_time,
                completed,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(todo.id.as_uuid())
        .bind(todo.owner_id.as_uuid())
        .bind(todo.title.as_str())
        .bind(todo.description.as_deref())
        .bind(todo.priority.as_str())
        .bind(todo.due_date.date())
        .bind(todo.due_time)
        .bind(todo.completed)
        .bind(todo.created_at)
        .bind(todo.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, todo_id: &TodoId) -> TodoResult<Option<OwnedTodo>> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT
                t.todo_id,
                t.owner_id,
                a.firstname || ' ' || a.lastname AS owner_name,
                t.title,
                t.description,
                t.priority,
                t.due_date,
                t.due_time,
                t.completed,
                t.created_at,
                t.updated_at
            FROM todos t
            JOIN accounts a ON a.account_id = t.owner_id
            WHERE t.todo_id = $1
            "#,
        )
        .bind(todo_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_owned_todo()).transpose()
    }

    async fn list_by_owner(&self, owner_id: &AccountId) -> TodoResult<Vec<OwnedTodo>> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT
                t.todo_id,
                t.owner_id,
                a.firstname || ' ' || a.lastname AS owner_name,
                t.title,
                t.description,
                t.priority,
                t.due_date,
                t.due_time,
                t.completed,
                t.created_at,
                t.updated_at
            FROM todos t
            JOIN accounts a ON a.account_id = t.owner_id
            WHERE t.owner_id = $1
            ORDER BY t.created_at DESC
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_owned_todo()).collect()
    }

    async fn update(&self, todo: &TodoItem) -> TodoResult<()> {
        sqlx::query(
            r#"
            UPDATE todos SET
                title = $2,
                description = $3,
                priority = $4,
                due_date = $5,
                due_time = $6,
                completed = $7,
                updated_at = $8
            WHERE todo_id = $1
            "#,
        )
        .bind(todo.id.as_uuid())
        .bind(todo.title.as_str())
        .bind(todo.description.as_deref())
        .bind(todo.priority.as_str())
        .bind(todo.due_date.date())
        .bind(todo.due_time)
        .bind(todo.completed)
        .bind(todo.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, todo_id: &TodoId) -> TodoResult<bool> {
        let deleted = sqlx::query("DELETE FROM todos WHERE todo_id = $1")
            .bind(todo_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct TodoRow {
    todo_id: Uuid,
    owner_id: Uuid,
    owner_name: String,
    title: String,
    description: Option<String>,
    priority: String,
    due_date: NaiveDate,
    due_time: NaiveTime,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TodoRow {
    fn into_owned_todo(self) -> TodoResult<OwnedTodo> {
        let priority = self
            .priority
            .parse::<Priority>()
            .map_err(|_| TodoError::Internal(format!("Invalid priority: {}", self.priority)))?;

        Ok(OwnedTodo {
            item: TodoItem {
                id: TodoId::from_uuid(self.todo_id),
                owner_id: AccountId::from_uuid(self.owner_id),
                title: Title::from_db(self.title),
                description: self.description,
                priority,
                due_date: DueDate::from_db(self.due_date),
                due_time: self.due_time,
                completed: self.completed,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            owner_name: self.owner_name,
        })
    }
}
