//! Auth Middleware
//!
//! Middleware for requiring authentication on protected routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::Response;
use platform::cookie::extract_cookie;
use platform::token::extract_bearer_token;

use crate::application::config::AccountConfig;
use crate::application::AuthenticateUseCase;
use crate::domain::repository::{AccountRepository, RevokedTokenRepository};
use crate::error::{AccountError, AccountResult};
use crate::presentation::handlers::AccountAppState;

/// Middleware that requires a valid access token
///
/// The token is read from `Authorization: Bearer`, falling back to the
/// access cookie. On success the caller's [`AuthenticatedAccount`] is
/// stored in the request extensions.
///
/// [`AuthenticatedAccount`]: crate::application::AuthenticatedAccount
pub async fn require_auth<R>(
    State(state): State<AccountAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> AccountResult<Response>
where
    R: AccountRepository + RevokedTokenRepository + Clone + Send + Sync + 'static,
{
    let token = access_token(req.headers(), &state.config)
        .ok_or(AccountError::Unauthenticated("Authentication credentials were not provided."))?;

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.issuer.clone());
    let caller = use_case.execute(&token).await?;

    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}

/// Header credential wins over the cookie
fn access_token(headers: &HeaderMap, config: &AccountConfig) -> Option<String> {
    extract_bearer_token(headers).or_else(|| extract_cookie(headers, &config.access_cookie_name))
}
