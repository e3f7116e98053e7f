//! Refresh Token Use Case
//!
//! Exchanges a refresh token for a new access token. The refresh token is
//! not rotated.

use std::sync::Arc;

use crate::application::authenticate::active_account;
use crate::application::token_issuer::TokenIssuer;
use crate::domain::repository::{AccountRepository, RevokedTokenRepository};
use crate::domain::value_object::token_claims::TokenType;
use crate::error::{AccountError, AccountResult};

/// Refresh token use case
pub struct RefreshTokenUseCase<R>
where
    R: AccountRepository + RevokedTokenRepository,
{
    repo: Arc<R>,
    issuer: Arc<TokenIssuer>,
}

impl<R> RefreshTokenUseCase<R>
where
    R: AccountRepository + RevokedTokenRepository,
{
    pub fn new(repo: Arc<R>, issuer: Arc<TokenIssuer>) -> Self {
        Self { repo, issuer }
    }

    /// Returns the new access token
    pub async fn execute(&self, refresh_token: &str) -> AccountResult<String> {
        let claims = self.issuer.decode(refresh_token, TokenType::Refresh)?;

        if self.repo.is_revoked(claims.jti).await? {
            return Err(AccountError::Unauthenticated("Token is blacklisted"));
        }

        let account_id = claims
            .account_id()
            .ok_or(AccountError::Unauthenticated("Token contained no recognizable user identification"))?;
        active_account(self.repo.as_ref(), &account_id).await?;

        let access = self.issuer.issue_access(&claims)?;

        tracing::debug!(sub = %claims.sub, "Access token refreshed");

        Ok(access)
    }
}
