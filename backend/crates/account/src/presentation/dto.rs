//! API DTOs (Data Transfer Objects)

use kernel::id::AccountId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::account::Account;

/// `last_login` wire format
const LAST_LOGIN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// Register
// ============================================================================

/// Register request
///
/// Fields are optional here so that absent ones surface as per-field
/// "required" errors instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login response: the profile plus both tokens
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub access_token: String,
    pub refresh_token: String,
}

// ============================================================================
// Logout / Token refresh
// ============================================================================

/// Body of `/token/refresh` and (optionally) `/logout`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

/// Token refresh response
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Logout response
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: &'static str,
}

// ============================================================================
// Profile
// ============================================================================

/// Public account profile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: AccountId,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    /// `YYYY-MM-DD HH:MM:SS` or null
    pub last_login: Option<String>,
}

impl From<&Account> for ProfileResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.account_id,
            firstname: account.firstname.as_str().to_string(),
            lastname: account.lastname.as_str().to_string(),
            email: account.email.as_str().to_string(),
            last_login: account
                .last_login
                .map(|at| at.format(LAST_LOGIN_FORMAT).to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        account_password::{AccountPassword, RawPassword},
        email::Email,
        person_name::PersonName,
    };
    use chrono::TimeZone;

    fn account() -> Account {
        let raw = RawPassword::new("AAbbcc12!".to_string()).unwrap();
        Account::new(
            PersonName::first("Ada").unwrap(),
            PersonName::last("Lovelace").unwrap(),
            Email::new("ada@example.com").unwrap(),
            AccountPassword::from_raw(&raw, None).unwrap(),
        )
    }

    #[test]
    fn test_profile_never_contains_password() {
        let json = serde_json::to_value(ProfileResponse::from(&account())).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 5);
        assert!(json.get("password").is_none());
        assert!(json["last_login"].is_null());
    }

    #[test]
    fn test_last_login_format() {
        let mut account = account();
        account.last_login = Some(chrono::Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap());
        let profile = ProfileResponse::from(&account);
        assert_eq!(profile.last_login.as_deref(), Some("2024-03-09 14:05:07"));
    }

    #[test]
    fn test_login_response_is_flat() {
        let response = LoginResponse {
            profile: ProfileResponse::from(&account()),
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
        };
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["access_token"], "a");
    }
}
