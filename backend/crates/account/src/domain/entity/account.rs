//! Account Entity
//!
//! A registered user. Email is the login identifier; the password is only
//! ever held as an Argon2id hash.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;

use crate::domain::value_object::{
    account_password::AccountPassword, email::Email, person_name::PersonName,
};

/// Account entity
#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: AccountId,
    pub firstname: PersonName,
    pub lastname: PersonName,
    /// Unique, lower-cased
    pub email: Email,
    pub password_hash: AccountPassword,
    pub is_staff: bool,
    pub is_superuser: bool,
    /// Inactive accounts cannot log in or use existing tokens
    pub is_active: bool,
    /// Last successful login time
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new active, non-staff account
    pub fn new(
        firstname: PersonName,
        lastname: PersonName,
        email: Email,
        password_hash: AccountPassword,
    ) -> Self {
        Self {
            account_id: AccountId::new(),
            firstname,
            lastname,
            email,
            password_hash,
            is_staff: false,
            is_superuser: false,
            is_active: true,
            last_login: None,
            created_at: Utc::now(),
        }
    }

    /// Record successful login
    pub fn record_login(&mut self) {
        self.last_login = Some(Utc::now());
    }

    /// Check if account can login
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// "firstname lastname"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}
