//! Authenticate Use Case
//!
//! Resolves an access token into the caller's identity. Used by the auth
//! middleware on every protected route.

use std::sync::Arc;

use kernel::id::AccountId;

use crate::application::token_issuer::TokenIssuer;
use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountRepository, RevokedTokenRepository};
use crate::domain::value_object::token_claims::{TokenClaims, TokenType};
use crate::error::{AccountError, AccountResult};

/// Caller identity, stored in request extensions by the auth middleware
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
    pub firstname: String,
    pub lastname: String,
    /// Claims of the access token used for this request
    pub claims: TokenClaims,
}

impl AuthenticatedAccount {
    /// "firstname lastname"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Authenticate use case
pub struct AuthenticateUseCase<R>
where
    R: AccountRepository + RevokedTokenRepository,
{
    repo: Arc<R>,
    issuer: Arc<TokenIssuer>,
}

impl<R> AuthenticateUseCase<R>
where
    R: AccountRepository + RevokedTokenRepository,
{
    pub fn new(repo: Arc<R>, issuer: Arc<TokenIssuer>) -> Self {
        Self { repo, issuer }
    }

    pub async fn execute(&self, access_token: &str) -> AccountResult<AuthenticatedAccount> {
        let claims = self.issuer.decode(access_token, TokenType::Access)?;

        let account_id = claims
            .account_id()
            .ok_or(AccountError::Unauthenticated("Token contained no recognizable user identification"))?;

        if self.repo.is_revoked(claims.jti).await? {
            return Err(AccountError::Unauthenticated("Token is blacklisted"));
        }

        let account = active_account(self.repo.as_ref(), &account_id).await?;

        Ok(AuthenticatedAccount {
            account_id,
            firstname: account.firstname.as_str().to_string(),
            lastname: account.lastname.as_str().to_string(),
            claims,
        })
    }
}

/// Load the account a token was issued to
///
/// Deleted and deactivated accounts no longer authenticate, whatever tokens
/// they still hold.
pub(crate) async fn active_account<A>(repo: &A, account_id: &AccountId) -> AccountResult<Account>
where
    A: AccountRepository,
{
    let account = repo
        .find_by_id(account_id)
        .await?
        .ok_or(AccountError::Unauthenticated("User not found"))?;

    if !account.can_login() {
        tracing::warn!(account_id = %account_id, "Token presented for inactive account");
        return Err(AccountError::Unauthenticated("User is inactive"));
    }

    Ok(account)
}
