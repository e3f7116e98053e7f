//! ToDo Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Rules
//! - A to-do is created open (`completed = false`) and owned by the caller
//! - Due dates may not lie in the past when set
//! - Listing is scoped to the caller, newest first
//! - Single-item reads are public; mutations require authentication and are
//!   owner-scoped when `TodoConfig::enforce_ownership` is set

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::TodoConfig;
pub use error::{TodoError, TodoResult};
pub use infra::postgres::PgTodoRepository;
pub use presentation::router::todo_router;

#[cfg(test)]
mod tests;
