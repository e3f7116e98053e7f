//! Login Use Case
//!
//! Checks credentials and issues a token pair.

use std::sync::Arc;

use kernel::error::field_errors::FieldErrors;

use crate::application::config::AccountConfig;
use crate::application::token_issuer::{TokenIssuer, TokenPair};
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_password::RawPassword, email::Email};
use crate::error::{AccountError, AccountResult};

/// Login input
#[derive(Default)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Account with `last_login` already updated
    pub account: Account,
    pub tokens: TokenPair,
}

/// Login use case
pub struct LoginUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    issuer: Arc<TokenIssuer>,
    config: Arc<AccountConfig>,
}

impl<A> LoginUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, issuer: Arc<TokenIssuer>, config: Arc<AccountConfig>) -> Self {
        Self {
            account_repo,
            issuer,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AccountResult<LoginOutput> {
        let mut errors = FieldErrors::new();
        let email = errors.require("email", input.email);
        let password = errors.require("password", input.password);

        let (Some(email), Some(password)) = (email, password) else {
            return Err(AccountError::Validation(errors));
        };

        // A malformed address cannot belong to any account
        let email = Email::new(email).map_err(|_| AccountError::InvalidCredentials)?;

        let mut account = self
            .account_repo
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let raw_password = RawPassword::for_login(password);
        if !account
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            return Err(AccountError::InvalidCredentials);
        }

        if !account.can_login() {
            return Err(AccountError::InvalidCredentials);
        }

        let tokens = self.issuer.issue_pair(&account)?;

        account.record_login();
        self.account_repo.update(&account).await?;

        tracing::info!(account_id = %account.account_id, "Account logged in");

        Ok(LoginOutput { account, tokens })
    }
}
