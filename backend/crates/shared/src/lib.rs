//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary shared by the
//! account and todo crates:
//! - Common error types, result aliases and field-level validation errors
//! - Typed entity IDs
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod field_errors;
    pub mod kind;
}
pub mod id;
