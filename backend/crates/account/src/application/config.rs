//! Application Configuration
//!
//! Configuration for the Account application layer.

use std::fmt;
use std::time::Duration;

use platform::cookie::CookieConfig;

use crate::error::{AccountError, AccountResult};

/// Longest accepted token lifetime (10 years)
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 3600);

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Account application configuration
#[derive(Clone)]
pub struct AccountConfig {
    /// Access token cookie name
    pub access_cookie_name: String,
    /// Refresh token cookie name
    pub refresh_cookie_name: String,
    /// HMAC secret for token signing (at least 32 bytes)
    pub token_secret: Vec<u8>,
    /// Access token lifetime (5 minutes)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime (1 day)
    pub refresh_token_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: "access_token".to_string(),
            refresh_cookie_name: "refresh_token".to_string(),
            token_secret: vec![0u8; 32],
            access_token_ttl: Duration::from_secs(5 * 60), // 5 minutes
            refresh_token_ttl: Duration::from_secs(24 * 3600), // 1 day
            cookie_secure: true,
            cookie_same_site: SameSite::None,
            password_pepper: None,
        }
    }
}

impl AccountConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: platform::crypto::random_bytes(32),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Access token lifetime as a chrono duration
    pub fn access_ttl(&self) -> AccountResult<chrono::Duration> {
        token_ttl("access", self.access_token_ttl)
    }

    /// Refresh token lifetime as a chrono duration
    pub fn refresh_ttl(&self) -> AccountResult<chrono::Duration> {
        token_ttl("refresh", self.refresh_token_ttl)
    }

    /// Cookie carrying the access token
    pub fn access_cookie(&self) -> CookieConfig {
        self.cookie(&self.access_cookie_name, self.access_token_ttl)
    }

    /// Cookie carrying the refresh token
    pub fn refresh_cookie(&self) -> CookieConfig {
        self.cookie(&self.refresh_cookie_name, self.refresh_token_ttl)
    }

    fn cookie(&self, name: &str, ttl: Duration) -> CookieConfig {
        CookieConfig {
            name: name.to_string(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(ttl.as_secs()),
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountConfig")
            .field("access_cookie_name", &self.access_cookie_name)
            .field("refresh_cookie_name", &self.refresh_cookie_name)
            .field("token_secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Expiry is computed as `now + ttl`, which must stay a valid timestamp
fn token_ttl(kind: &str, ttl: Duration) -> AccountResult<chrono::Duration> {
    if ttl > MAX_TOKEN_TTL {
        return Err(AccountError::Internal(format!(
            "{} token lifetime of {}s exceeds the maximum of {}s",
            kind,
            ttl.as_secs(),
            MAX_TOKEN_TTL.as_secs()
        )));
    }

    chrono::Duration::from_std(ttl)
        .map_err(|e| AccountError::Internal(format!("{} token lifetime: {}", kind, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AccountConfig::default();
        assert_eq!(config.access_ttl().unwrap(), chrono::Duration::minutes(5));
        assert_eq!(config.refresh_ttl().unwrap(), chrono::Duration::days(1));
        assert_eq!(config.cookie_same_site, SameSite::None);
    }

    #[test]
    fn test_cookie_settings() {
        let config = AccountConfig::default();
        let cookie = config.refresh_cookie();
        assert_eq!(cookie.name, "refresh_token");
        assert!(cookie.http_only);
        assert!(cookie.secure);
        assert_eq!(cookie.max_age_secs, Some(86400));

        assert!(!AccountConfig::development().access_cookie().secure);
    }

    #[test]
    fn test_oversized_ttl_is_rejected() {
        let config = AccountConfig {
            access_token_ttl: Duration::from_secs(u64::MAX),
            refresh_token_ttl: MAX_TOKEN_TTL + Duration::from_secs(1),
            ..AccountConfig::default()
        };
        assert!(matches!(config.access_ttl(), Err(AccountError::Internal(_))));
        assert!(matches!(config.refresh_ttl(), Err(AccountError::Internal(_))));

        let config = AccountConfig {
            refresh_token_ttl: MAX_TOKEN_TTL,
            ..AccountConfig::default()
        };
        assert!(config.refresh_ttl().is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AccountConfig {
            password_pepper: Some(b"pepper".to_vec()),
            ..AccountConfig::with_random_secret()
        };
        let debug = format!("{:?}", config);
        assert!(debug.contains("REDACTED"));
        // b"pe" as Debug-printed bytes
        assert!(!debug.contains("112, 101"));
    }
}
