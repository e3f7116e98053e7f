//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{account::Account, revoked_token::RevokedToken};
pub use repository::{AccountRepository, RevokedTokenRepository};
