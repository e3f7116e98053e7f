//! Register Use Case
//!
//! Creates a new account after validating every field.

use std::sync::Arc;

use kernel::error::field_errors::FieldErrors;

use crate::application::config::AccountConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_password::{AccountPassword, PASSWORD_MISMATCH_MESSAGE, RawPassword},
    email::{EMAIL_TAKEN_MESSAGE, Email},
    person_name::PersonName,
};
use crate::error::{AccountError, AccountResult};

/// Register input
///
/// Every field is required; absent ones are reported per field.
#[derive(Default)]
pub struct RegisterInput {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Register use case
pub struct RegisterUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    config: Arc<AccountConfig>,
}

impl<A> RegisterUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, config: Arc<AccountConfig>) -> Self {
        Self {
            account_repo,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AccountResult<Account> {
        let mut errors = FieldErrors::new();

        let firstname = errors
            .require("firstname", input.firstname)
            .and_then(|v| errors.check("firstname", PersonName::first(v)));
        let lastname = errors
            .require("lastname", input.lastname)
            .and_then(|v| errors.check("lastname", PersonName::last(v)));
        let email = errors
            .require("email", input.email)
            .and_then(|v| errors.check("email", Email::new(v)));
        let password = errors
            .require("password", input.password)
            .and_then(|v| errors.check("password", RawPassword::new(v)));
        let confirm_password = errors
            .require("confirm_password", input.confirm_password)
            .and_then(|v| errors.check("confirm_password", RawPassword::new(v)));

        // Uniqueness is only worth a query once the format is valid
        if let Some(email) = &email {
            if self.account_repo.exists_by_email(email).await? {
                errors.add("email", EMAIL_TAKEN_MESSAGE);
            }
        }

        if let (Some(password), Some(confirm)) = (&password, &confirm_password) {
            if !password.matches(confirm) {
                errors.add("confirm_password", PASSWORD_MISMATCH_MESSAGE);
            }
        }

        let (Some(firstname), Some(lastname), Some(email), Some(password)) =
            (firstname, lastname, email, password)
        else {
            return Err(AccountError::Validation(errors));
        };

        if !errors.is_empty() {
            return Err(AccountError::Validation(errors));
        }

        let password_hash = AccountPassword::from_raw(&password, self.config.pepper())?;
        let account = Account::new(firstname, lastname, email, password_hash);

        self.account_repo.create(&account).await?;

        tracing::info!(
            account_id = %account.account_id,
            email = %account.email,
            "Account registered"
        );

        Ok(account)
    }
}
