//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::TodoId;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::entities::OwnedTodo;
use crate::domain::value_objects::{Priority, TIME_FORMAT};

/// Create request
///
/// Date and time arrive as strings so that format problems are reported per
/// field. `user` and `completed` are not read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub time: Option<String>,
}

/// Partial update request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    /// Absent: unchanged. `null`: cleared.
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub time: Option<String>,
}

/// Distinguishes an explicit `null` from an absent field
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// To-do representation
#[derive(Debug, Clone, Serialize)]
pub struct TodoResponse {
    pub id: TodoId,
    /// Owner as "firstname lastname"
    pub user: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: NaiveDate,
    /// `HH:MM:SS`
    pub time: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OwnedTodo> for TodoResponse {
    fn from(todo: OwnedTodo) -> Self {
        let item = todo.item;
        Self {
            id: item.id,
            user: todo.owner_name,
            title: item.title.as_str().to_string(),
            description: item.description,
            priority: item.priority,
            due_date: item.due_date.date(),
            time: item.due_time.format(TIME_FORMAT).to_string(),
            completed: item.completed,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}
