//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::AccountId;
use uuid::Uuid;

use crate::domain::entity::{account::Account, revoked_token::RevokedToken};
use crate::domain::value_object::email::Email;
use crate::error::AccountResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Create a new account
    ///
    /// A duplicate email is reported as a validation error on `email`.
    async fn create(&self, account: &Account) -> AccountResult<()>;

    /// Find account by ID
    async fn find_by_id(&self, account_id: &AccountId) -> AccountResult<Option<Account>>;

    /// Find account by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<Account>>;

    /// Check if email is registered
    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool>;

    /// Update account
    async fn update(&self, account: &Account) -> AccountResult<()>;
}

/// Token denylist repository trait
#[trait_variant::make(RevokedTokenRepository: Send)]
pub trait LocalRevokedTokenRepository {
    /// Add a token id to the denylist (idempotent)
    async fn revoke(&self, token: &RevokedToken) -> AccountResult<()>;

    /// Check whether a token id has been revoked
    async fn is_revoked(&self, jti: Uuid) -> AccountResult<bool>;

    /// Drop entries whose tokens have expired
    async fn cleanup_expired(&self) -> AccountResult<u64>;
}
