//! Token Claims Value Object
//!
//! Payload carried by access and refresh tokens. Both kinds share the same
//! identity claims and differ only in `token_type` and lifetime.

use chrono::{DateTime, Duration, Utc};
use kernel::id::AccountId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::account::Account;

/// Kind of bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Account id
    pub sub: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
    /// Token id, used for revocation
    pub jti: Uuid,
    pub token_type: TokenType,
    pub firstname: String,
    pub lastname: String,
}

impl TokenClaims {
    /// Claims for a freshly issued token of `token_type`
    pub fn new(account: &Account, token_type: TokenType, ttl: Duration) -> Self {
        Self::issue(
            account.account_id.to_string(),
            account.firstname.as_str().to_string(),
            account.lastname.as_str().to_string(),
            token_type,
            ttl,
        )
    }

    /// Access-token claims carrying the identity of a refresh token
    pub fn access_from_refresh(refresh: &TokenClaims, ttl: Duration) -> Self {
        Self::issue(
            refresh.sub.clone(),
            refresh.firstname.clone(),
            refresh.lastname.clone(),
            TokenType::Access,
            ttl,
        )
    }

    fn issue(
        sub: String,
        firstname: String,
        lastname: String,
        token_type: TokenType,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4(),
            token_type,
            firstname,
            lastname,
        }
    }

    /// Parse the subject back into an account id
    pub fn account_id(&self) -> Option<AccountId> {
        self.sub.parse().ok()
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
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
    fn test_new_claims() {
        let account = account();
        let claims = TokenClaims::new(&account, TokenType::Access, Duration::minutes(5));

        assert_eq!(claims.account_id(), Some(account.account_id));
        assert_eq!(claims.exp - claims.iat, 300);
        assert_eq!(claims.firstname, "Ada");
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn test_access_from_refresh_keeps_identity() {
        let refresh = TokenClaims::new(&account(), TokenType::Refresh, Duration::days(1));
        let access = TokenClaims::access_from_refresh(&refresh, Duration::minutes(5));

        assert_eq!(access.sub, refresh.sub);
        assert_eq!(access.lastname, "Lovelace");
        assert_eq!(access.token_type, TokenType::Access);
        assert_ne!(access.jti, refresh.jti);
    }

    #[test]
    fn test_token_type_wire_format() {
        assert_eq!(serde_json::to_string(&TokenType::Refresh).unwrap(), "\"refresh\"");
    }
}
