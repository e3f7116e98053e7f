//! Application Layer
//!
//! Use cases and application services.

mod access;
pub mod add_todo;
pub mod complete_todo;
pub mod config;
pub mod delete_todo;
pub mod get_todo;
pub mod list_todos;
pub mod update_todo;

// Re-exports
pub use add_todo::{AddTodoInput, AddTodoUseCase};
pub use complete_todo::CompleteTodoUseCase;
pub use config::TodoConfig;
pub use delete_todo::DeleteTodoUseCase;
pub use get_todo::GetTodoUseCase;
pub use list_todos::ListTodosUseCase;
pub use update_todo::{UpdateTodoInput, UpdateTodoUseCase};
