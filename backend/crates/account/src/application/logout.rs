//! Logout Use Case
//!
//! Revokes the caller's access token and, when supplied, their refresh
//! token. Cookies are cleared by the HTTP layer.

use std::sync::Arc;

use crate::application::authenticate::AuthenticatedAccount;
use crate::application::token_issuer::TokenIssuer;
use crate::domain::entity::revoked_token::RevokedToken;
use crate::domain::repository::RevokedTokenRepository;
use crate::domain::value_object::token_claims::TokenType;
use crate::error::AccountResult;

/// Logout use case
pub struct LogoutUseCase<T>
where
    T: RevokedTokenRepository,
{
    revoked_repo: Arc<T>,
    issuer: Arc<TokenIssuer>,
}

impl<T> LogoutUseCase<T>
where
    T: RevokedTokenRepository,
{
    pub fn new(revoked_repo: Arc<T>, issuer: Arc<TokenIssuer>) -> Self {
        Self {
            revoked_repo,
            issuer,
        }
    }

    pub async fn execute(
        &self,
        caller: &AuthenticatedAccount,
        refresh_token: Option<&str>,
    ) -> AccountResult<()> {
        self.revoked_repo
            .revoke(&RevokedToken::from_claims(&caller.claims, caller.account_id))
            .await?;

        if let Some(token) = refresh_token {
            match self.issuer.decode(token, TokenType::Refresh) {
                Ok(claims) if claims.account_id() == Some(caller.account_id) => {
                    self.revoked_repo
                        .revoke(&RevokedToken::from_claims(&claims, caller.account_id))
                        .await?;
                }
                Ok(_) => {
                    tracing::warn!(
                        account_id = %caller.account_id,
                        "Refresh token of another account presented at logout"
                    );
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Ignoring unusable refresh token at logout");
                }
            }
        }

        tracing::info!(account_id = %caller.account_id, "Account logged out");

        Ok(())
    }
}
