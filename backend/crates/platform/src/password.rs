//! Password Policy, Hashing and Verification
//!
//! - Complexity policy: at least 8 characters with 2 uppercase letters,
//!   2 lowercase letters, 1 digit and 1 special character
//! - Argon2id hashing (memory-hard, recommended by OWASP) in PHC format
//! - Zeroization of clear-text input
//! - Optional application-wide pepper

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (keeps hashing cost bounded)
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Minimum number of ASCII uppercase letters
pub const MIN_UPPERCASE: usize = 2;

/// Minimum number of ASCII lowercase letters
pub const MIN_LOWERCASE: usize = 2;

/// Minimum number of ASCII digits
pub const MIN_DIGITS: usize = 1;

/// Minimum number of characters from [`SPECIAL_CHARACTERS`]
pub const MIN_SPECIAL: usize = 1;

/// Characters that count towards the special-character requirement
pub const SPECIAL_CHARACTERS: &str = "!#$%&()*+,-.:;<=>?@_~";

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password must contain at least {min} uppercase letters")]
    MissingUppercase { min: usize },

    #[error("Password must contain at least {min} lowercase letters")]
    MissingLowercase { min: usize },

    #[error("Password must contain at least {min} digit")]
    MissingDigit { min: usize },

    #[error("Password must contain at least {min} special character")]
    MissingSpecial { min: usize },

    /// Line breaks and other control characters
    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a clear text password that satisfies the complexity policy.
    ///
    /// Unicode is normalized using NFKC before the checks run.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::normalized(raw);
        check_policy(&password.0)?;
        Ok(password)
    }

    /// Wrap user input without running the policy.
    ///
    /// Used on login: a stored hash is the only authority there, and policy
    /// details must not leak through the error.
    pub fn unchecked(raw: String) -> Self {
        Self::normalized(raw)
    }

    fn normalized(mut raw: String) -> Self {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Constant-shape equality check between two clear-text inputs
    /// (password / confirmation)
    pub fn matches(&self, other: &ClearTextPassword) -> bool {
        let (a, b) = (self.as_bytes(), other.as_bytes());
        if a.len() != b.len() {
            return false;
        }
        a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
    }

    /// Hash the password using Argon2id
    ///
    /// ## Arguments
    /// * `pepper` - Optional application-wide secret
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let mut password_bytes = peppered(self.as_bytes(), pepper);

        // Random 128-bit salt
        let salt = SaltString::generate(OsRng);

        // OWASP recommended Argon2id parameters:
        // m=19456 (19 MiB), t=2, p=1
        let result = Argon2::default()
            .hash_password(&password_bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        password_bytes.zeroize();
        result
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// The PHC string carries algorithm, version, parameters, salt and hash.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Argon2 compares in constant time internally.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return false;
        };

        let mut password_bytes = peppered(password.as_bytes(), pepper);
        let valid = Argon2::default()
            .verify_password(&password_bytes, &parsed_hash)
            .is_ok();
        password_bytes.zeroize();
        valid
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn peppered(password: &[u8], pepper: Option<&[u8]>) -> Vec<u8> {
    let mut bytes = password.to_vec();
    if let Some(p) = pepper {
        bytes.extend_from_slice(p);
    }
    bytes
}

/// Run the complexity policy against a normalized password
fn check_policy(password: &str) -> Result<(), PasswordPolicyError> {
    let char_count = password.chars().count();

    if char_count < MIN_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooShort {
            min: MIN_PASSWORD_LENGTH,
            actual: char_count,
        });
    }

    if char_count > MAX_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooLong {
            max: MAX_PASSWORD_LENGTH,
            actual: char_count,
        });
    }

    if password.chars().any(char::is_control) {
        return Err(PasswordPolicyError::InvalidCharacter);
    }

    let count = |pred: fn(&char) -> bool| password.chars().filter(pred).count();

    if count(char::is_ascii_uppercase) < MIN_UPPERCASE {
        return Err(PasswordPolicyError::MissingUppercase { min: MIN_UPPERCASE });
    }
    if count(char::is_ascii_lowercase) < MIN_LOWERCASE {
        return Err(PasswordPolicyError::MissingLowercase { min: MIN_LOWERCASE });
    }
    if count(char::is_ascii_digit) < MIN_DIGITS {
        return Err(PasswordPolicyError::MissingDigit { min: MIN_DIGITS });
    }
    if count(|c| SPECIAL_CHARACTERS.contains(*c)) < MIN_SPECIAL {
        return Err(PasswordPolicyError::MissingSpecial { min: MIN_SPECIAL });
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
