//! Account Router

use axum::{
    Router,
    middleware,
    routing::{get, post},
};

use crate::domain::repository::{AccountRepository, RevokedTokenRepository};
use crate::presentation::handlers::{self, AccountAppState};
use crate::presentation::middleware::require_auth;

/// Create the Account router for any repository implementation
///
/// `/logout` and `/profile` sit behind [`require_auth`].
pub fn account_router<R>(state: AccountAppState<R>) -> Router
where
    R: AccountRepository + RevokedTokenRepository + Clone + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/logout", post(handlers::logout::<R>))
        .route("/profile", get(handlers::profile::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<R>,
        ));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/token/refresh", post(handlers::refresh_token::<R>))
        .merge(protected)
        .with_state(state)
}
