//! Account Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, auth middleware
//!
//! ## Features
//! - Registration with per-field validation (names, email, password policy)
//! - Email + password login issuing an access/refresh token pair
//! - Tokens delivered in the body and as HttpOnly cookies
//! - Logout through a denylist of token ids
//! - Access-token refresh
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - HS256-signed tokens with a 5 minute access / 1 day refresh lifetime
//! - Login failures are indistinguishable from each other

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AccountConfig;
pub use application::AuthenticatedAccount;
pub use error::{AccountError, AccountResult};
pub use infra::postgres::PgAccountRepository;
pub use presentation::{AccountAppState, account_router, require_auth};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
