//! Server Configuration
//!
//! Everything the binary reads from the environment, resolved once at
//! startup into the feature crates' config structs.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use account::AccountConfig;
use anyhow::{Context, bail};
use todo::TodoConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Resolved server configuration
#[derive(Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub account: AccountConfig,
    pub todo: TodoConfig,
}

impl ServerConfig {
    /// Read configuration from process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// `development` relaxes the token secret (random when unset) and the
    /// default of the cookie `Secure` attribute.
    pub fn from_lookup<F>(lookup: F, development: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let max_connections = parse_or(&var, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address")?;

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let mut account = if development {
            AccountConfig::development()
        } else {
            AccountConfig::default()
        };

        match var("JWT_SECRET") {
            Some(encoded) => {
                account.token_secret = platform::crypto::from_base64(&encoded)
                    .context("JWT_SECRET must be base64")?;
            }
            None if development => {
                tracing::warn!("JWT_SECRET not set, using a random secret");
            }
            None => bail!("JWT_SECRET must be set in production"),
        }

        account.access_token_ttl = Duration::from_secs(parse_or(
            &var,
            "ACCESS_TOKEN_TTL_SECS",
            account.access_token_ttl.as_secs(),
        )?);
        account.refresh_token_ttl = Duration::from_secs(parse_or(
            &var,
            "REFRESH_TOKEN_TTL_SECS",
            account.refresh_token_ttl.as_secs(),
        )?);
        account
            .access_ttl()
            .context("ACCESS_TOKEN_TTL_SECS is out of range")?;
        account
            .refresh_ttl()
            .context("REFRESH_TOKEN_TTL_SECS is out of range")?;
        account.cookie_secure = parse_or(&var, "COOKIE_SECURE", account.cookie_secure)?;
        account.password_pepper = var("PASSWORD_PEPPER").map(String::into_bytes);

        let todo = TodoConfig {
            enforce_ownership: parse_or(&var, "TODO_ENFORCE_OWNERSHIP", false)?,
        };

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            frontend_origins,
            account,
            todo,
        })
    }
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_development_defaults() {
        let config =
            ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db")]), true).unwrap();

        assert_eq!(config.max_connections, 5);
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.frontend_origins.len(), 2);
        assert_eq!(config.account.token_secret.len(), 32);
        assert!(!config.account.cookie_secure);
        assert_eq!(config.account.access_token_ttl, Duration::from_secs(300));
        assert!(!config.todo.enforce_ownership);
    }

    #[test]
    fn test_production_requires_secret() {
        let result = ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db")]), false);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let secret = platform::crypto::to_base64(&[9u8; 48]);
        let config = ServerConfig::from_lookup(
            lookup(&[
                ("DATABASE_URL", "postgres://db"),
                ("JWT_SECRET", &secret),
                ("BIND_ADDR", "127.0.0.1:9000"),
                ("ACCESS_TOKEN_TTL_SECS", "60"),
                ("COOKIE_SECURE", "false"),
                ("PASSWORD_PEPPER", "pepper"),
                ("TODO_ENFORCE_OWNERSHIP", "true"),
                ("FRONTEND_ORIGINS", "https://app.example.com, "),
            ]),
            false,
        )
        .unwrap();

        assert_eq!(config.account.token_secret, vec![9u8; 48]);
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.account.access_token_ttl, Duration::from_secs(60));
        assert!(!config.account.cookie_secure);
        assert_eq!(config.account.password_pepper.as_deref(), Some(&b"pepper"[..]));
        assert!(config.todo.enforce_ownership);
        assert_eq!(config.frontend_origins, vec!["https://app.example.com"]);
    }

    #[test]
    fn test_oversized_ttl_is_reported() {
        let err = ServerConfig::from_lookup(
            lookup(&[
                ("DATABASE_URL", "postgres://db"),
                ("REFRESH_TOKEN_TTL_SECS", "18446744073709551615"),
            ]),
            true,
        )
        .unwrap_err();
        assert!(err.to_string().contains("REFRESH_TOKEN_TTL_SECS"));
    }

    #[test]
    fn test_invalid_number_is_reported() {
        let err = ServerConfig::from_lookup(
            lookup(&[
                ("DATABASE_URL", "postgres://db"),
                ("DATABASE_MAX_CONNECTIONS", "many"),
            ]),
            true,
        )
        .unwrap_err();
        assert!(err.to_string().contains("DATABASE_MAX_CONNECTIONS"));
    }
}
