//! HTTP Handlers

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use kernel::error::field_errors::FieldErrors;
use platform::cookie::{append_delete_cookie, append_set_cookie, extract_cookie};
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::{
    AuthenticatedAccount, GetProfileUseCase, LoginInput, LoginUseCase, LogoutUseCase,
    RefreshTokenUseCase, RegisterInput, RegisterUseCase, TokenIssuer,
};
use crate::domain::repository::{AccountRepository, RevokedTokenRepository};
use crate::error::{AccountError, AccountResult};
use crate::presentation::dto::{
    LoginRequest, LoginResponse, ProfileResponse, RefreshRequest, RefreshResponse,
    RegisterRequest, SuccessResponse,
};

/// Shared state for account handlers and the auth middleware
#[derive(Clone)]
pub struct AccountAppState<R>
where
    R: AccountRepository + RevokedTokenRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountConfig>,
    pub issuer: Arc<TokenIssuer>,
}

impl<R> AccountAppState<R>
where
    R: AccountRepository + RevokedTokenRepository + Clone + Send + Sync + 'static,
{
    /// Fails when the configured token secret is too weak to sign with
    pub fn new(repo: R, config: AccountConfig) -> AccountResult<Self> {
        let issuer = TokenIssuer::new(&config)?;
        Ok(Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            issuer: Arc::new(issuer),
        })
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R>(
    State(state): State<AccountAppState<R>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AccountResult<impl IntoResponse>
where
    R: AccountRepository + RevokedTokenRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        firstname: req.firstname,
        lastname: req.lastname,
        email: req.email,
        password: req.password,
        confirm_password: req.confirm_password,
    };

    let account = use_case.execute(input).await?;

    Ok((StatusCode::CREATED, Json(ProfileResponse::from(&account))))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R>(
    State(state): State<AccountAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AccountResult<impl IntoResponse>
where
    R: AccountRepository + RevokedTokenRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.issuer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let mut headers = HeaderMap::new();
    append_set_cookie(
        &mut headers,
        &state.config.access_cookie(),
        &output.tokens.access_token,
    );
    append_set_cookie(
        &mut headers,
        &state.config.refresh_cookie(),
        &output.tokens.refresh_token,
    );

    Ok((
        StatusCode::OK,
        headers,
        Json(LoginResponse {
            profile: ProfileResponse::from(&output.account),
            access_token: output.tokens.access_token,
            refresh_token: output.tokens.refresh_token,
        }),
    ))
}

// ============================================================================
// Logout (requires authentication)
// ============================================================================

/// POST /logout
///
/// The refresh token may come in the body (`{"refresh": ...}`) or the
/// refresh cookie; either way both cookies are cleared.
pub async fn logout<R>(
    State(state): State<AccountAppState<R>>,
    Extension(caller): Extension<AuthenticatedAccount>,
    headers: HeaderMap,
    body: Bytes,
) -> AccountResult<impl IntoResponse>
where
    R: AccountRepository + RevokedTokenRepository + Clone + Send + Sync + 'static,
{
    let refresh_token = parse_refresh_body(&body)?
        .refresh
        .or_else(|| extract_cookie(&headers, &state.config.refresh_cookie_name));

    let use_case = LogoutUseCase::new(state.repo.clone(), state.issuer.clone());
    use_case.execute(&caller, refresh_token.as_deref()).await?;

    let mut response_headers = HeaderMap::new();
    append_delete_cookie(&mut response_headers, &state.config.access_cookie());
    append_delete_cookie(&mut response_headers, &state.config.refresh_cookie());

    Ok((
        StatusCode::OK,
        response_headers,
        Json(SuccessResponse {
            success: "User logged out",
        }),
    ))
}

// ============================================================================
// Profile (requires authentication)
// ============================================================================

/// GET /profile
pub async fn profile<R>(
    State(state): State<AccountAppState<R>>,
    Extension(caller): Extension<AuthenticatedAccount>,
) -> AccountResult<Json<ProfileResponse>>
where
    R: AccountRepository + RevokedTokenRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetProfileUseCase::new(state.repo.clone());
    let account = use_case.execute(&caller.account_id).await?;

    Ok(Json(ProfileResponse::from(&account)))
}

// ============================================================================
// Token Refresh
// ============================================================================

/// POST /token/refresh
pub async fn refresh_token<R>(
    State(state): State<AccountAppState<R>>,
    headers: HeaderMap,
    body: Bytes,
) -> AccountResult<impl IntoResponse>
where
    R: AccountRepository + RevokedTokenRepository + Clone + Send + Sync + 'static,
{
    let refresh = parse_refresh_body(&body)?
        .refresh
        .or_else(|| extract_cookie(&headers, &state.config.refresh_cookie_name))
        .ok_or_else(|| {
            AccountError::Validation(FieldErrors::single(
                "refresh",
                kernel::error::field_errors::REQUIRED_MESSAGE,
            ))
        })?;

    let use_case = RefreshTokenUseCase::new(state.repo.clone(), state.issuer.clone());
    let access = use_case.execute(&refresh).await?;

    let mut response_headers = HeaderMap::new();
    append_set_cookie(&mut response_headers, &state.config.access_cookie(), &access);

    Ok((
        StatusCode::OK,
        response_headers,
        Json(RefreshResponse { access }),
    ))
}

// ============================================================================
// Helpers
// ============================================================================

/// Empty bodies are allowed; the token may arrive as a cookie instead
fn parse_refresh_body(body: &[u8]) -> AccountResult<RefreshRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RefreshRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| AccountError::BadRequest(e.to_string()))
}
