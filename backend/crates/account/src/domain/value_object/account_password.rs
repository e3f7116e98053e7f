//! Account Password Value Object
//!
//! Domain value object for account passwords.
//! Delegates to `platform::password` for policy checks and Argon2id hashing.
//!
//! ## Usage
//! ```rust
//! use account::domain::value_object::account_password::{AccountPassword, RawPassword};
//!
//! let raw = RawPassword::new("AAbbcc12!".to_string()).unwrap();
//! let hashed = AccountPassword::from_raw(&raw, None).unwrap();
//! assert!(hashed.verify(&raw, None));
//! ```

use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

/// Message for any complexity-policy violation
pub const PASSWORD_POLICY_MESSAGE: &str = "Invalid password. Password must contain at least 2 uppercase letters, 2 lowercase letters, 1 digit and 1 special character. Minimum length is 8 characters.";

/// Message when password and confirmation differ
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match!";

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a raw password that satisfies the complexity policy
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooLong { max, .. } => AppError::bad_request(format!(
                "Ensure this field has no more than {} characters.",
                max
            )),
            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
            }
            _ => AppError::bad_request(PASSWORD_POLICY_MESSAGE),
        })?;

        Ok(Self(clear_text))
    }

    /// Wrap a password submitted for login without the policy check
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::unchecked(raw))
    }

    /// Whether `other` is the same password (confirmation check)
    pub fn matches(&self, other: &RawPassword) -> bool {
        self.0.matches(&other.0)
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Account Password (Hashed, for storage)
// ============================================================================

/// Hashed account password in Argon2id PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct AccountPassword(HashedPassword);

impl AccountPassword {
    /// Create from raw password by hashing
    ///
    /// ## Arguments
    /// * `raw` - The validated raw password
    /// * `pepper` - Optional application-wide secret
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw
            .0
            .hash(pepper)
            .map_err(|e| AppError::internal(e.to_string()))?;

        Ok(Self(hashed))
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string).map_err(|_| {
            AppError::new(
                ErrorKind::InternalServerError,
                "Invalid password hash in database",
            )
        })?;

        Ok(Self(hashed))
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash
    ///
    /// `pepper` must match the one used during hashing.
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for AccountPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
