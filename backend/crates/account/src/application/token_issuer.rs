//! Token Issuer
//!
//! Mints and verifies the access/refresh token pair. Stateless apart from
//! the signing key; revocation is checked by the callers.

use platform::token::TokenSigner;

use crate::application::config::AccountConfig;
use crate::domain::entity::account::Account;
use crate::domain::value_object::token_claims::{TokenClaims, TokenType};
use crate::error::{AccountError, AccountResult};

/// Freshly issued token pair
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone)]
pub struct TokenIssuer {
    signer: TokenSigner,
    access_ttl: chrono::Duration,
    refresh_ttl: chrono::Duration,
}

impl TokenIssuer {
    pub fn new(config: &AccountConfig) -> AccountResult<Self> {
        Ok(Self {
            signer: TokenSigner::new(&config.token_secret)?,
            access_ttl: config.access_ttl()?,
            refresh_ttl: config.refresh_ttl()?,
        })
    }

    /// Issue access and refresh tokens for `account`
    pub fn issue_pair(&self, account: &Account) -> AccountResult<TokenPair> {
        let access = TokenClaims::new(account, TokenType::Access, self.access_ttl);
        let refresh = TokenClaims::new(account, TokenType::Refresh, self.refresh_ttl);

        Ok(TokenPair {
            access_token: self.signer.sign(&access)?,
            refresh_token: self.signer.sign(&refresh)?,
        })
    }

    /// Issue a new access token for the holder of `refresh`
    pub fn issue_access(&self, refresh: &TokenClaims) -> AccountResult<String> {
        let claims = TokenClaims::access_from_refresh(refresh, self.access_ttl);
        Ok(self.signer.sign(&claims)?)
    }

    /// Verify a token and check it is of the `expected` kind
    pub fn decode(&self, token: &str, expected: TokenType) -> AccountResult<TokenClaims> {
        let claims: TokenClaims = self.signer.verify(token)?;

        if claims.token_type != expected {
            return Err(AccountError::Unauthenticated("Token has wrong type"));
        }

        Ok(claims)
    }
}
