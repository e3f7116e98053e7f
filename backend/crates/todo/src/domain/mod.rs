//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (TodoItem, OwnedTodo)
//! - Domain value objects (Title, Priority, DueDate)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;
