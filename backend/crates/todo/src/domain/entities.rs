//! Domain Entities
//!
//! Core business entities for the to-do domain.

use chrono::{DateTime, NaiveTime, Utc};
use kernel::id::{AccountId, TodoId};

use crate::domain::value_objects::{DueDate, Priority, Title};

/// To-do item entity - one task owned by exactly one account
#[derive(Debug, Clone)]
pub struct TodoItem {
    pub id: TodoId,
    pub owner_id: AccountId,
    pub title: Title,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: DueDate,
    pub due_time: NaiveTime,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TodoItem {
    /// Create a new, not yet completed item for `owner_id`
    pub fn new(
        owner_id: AccountId,
        title: Title,
        description: Option<String>,
        priority: Priority,
        due_date: DueDate,
        due_time: NaiveTime,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TodoId::new(),
            owner_id,
            title,
            description,
            priority,
            due_date,
            due_time,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update; ownership and completion are not touched
    pub fn apply(&mut self, changes: TodoChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = due_date;
        }
        if let Some(due_time) = changes.due_time {
            self.due_time = due_time;
        }
        self.touch();
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
        self.touch();
    }

    pub fn is_owned_by(&self, account_id: &AccountId) -> bool {
        &self.owner_id == account_id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Validated fields of a partial update
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct TodoChanges {
    pub title: Option<Title>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub due_date: Option<DueDate>,
    pub due_time: Option<NaiveTime>,
}

/// A to-do together with its owner's display name ("firstname lastname")
#[derive(Debug, Clone)]
pub struct OwnedTodo {
    pub item: TodoItem,
    pub owner_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> TodoItem {
        let today = Utc::now().date_naive();
        TodoItem::new(
            AccountId::new(),
            Title::new("Write report").unwrap(),
            Some("Quarterly".to_string()),
            Priority::default(),
            DueDate::new(today, today).unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_new_item_is_open() {
        let item = item();
        assert!(!item.completed);
        assert_eq!(item.priority, Priority::Low);
        assert_eq!(item.created_at, item.updated_at);
    }

    #[test]
    fn test_apply_partial_changes() {
        let mut item = item();
        let owner = item.owner_id;
        let created_at = item.created_at;

        item.apply(TodoChanges {
            priority: Some(Priority::High),
            description: Some(None),
            ..Default::default()
        });

        assert_eq!(item.priority, Priority::High);
        assert_eq!(item.description, None);
        assert_eq!(item.title.as_str(), "Write report");
        assert_eq!(item.owner_id, owner);
        assert_eq!(item.created_at, created_at);
        assert!(item.updated_at >= created_at);
        assert!(!item.completed);
    }

    #[test]
    fn test_mark_completed() {
        let mut item = item();
        item.mark_completed();
        assert!(item.completed);

        // Idempotent
        item.mark_completed();
        assert!(item.completed);
    }

    #[test]
    fn test_ownership() {
        let item = item();
        assert!(item.is_owned_by(&item.owner_id));
        assert!(!item.is_owned_by(&AccountId::new()));
    }
}
