//! Get Profile Use Case

use std::sync::Arc;

use kernel::id::AccountId;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::error::{AccountError, AccountResult};

/// Get profile use case
pub struct GetProfileUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
}

impl<A> GetProfileUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>) -> Self {
        Self { account_repo }
    }

    /// Load the caller's account
    ///
    /// A token outliving its account (or its activation) no longer
    /// authenticates anyone.
    pub async fn execute(&self, account_id: &AccountId) -> AccountResult<Account> {
        self.account_repo
            .find_by_id(account_id)
            .await?
            .filter(Account::can_login)
            .ok_or(AccountError::Unauthenticated("User not found"))
    }
}
