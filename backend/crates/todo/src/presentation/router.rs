//! ToDo Router

use account::{AccountAppState, require_auth};
use account::domain::repository::{AccountRepository, RevokedTokenRepository};
use axum::{
    Router,
    middleware,
    routing::{delete, get, patch, post},
};
use std::sync::Arc;

use crate::application::config::TodoConfig;
use crate::domain::repository::TodoRepository;
use crate::presentation::handlers::{self, TodoAppState};

/// Create the ToDo router
///
/// Everything except `GET /get/{id}` requires an access token, checked
/// against `auth`.
pub fn todo_router<R, A>(repo: R, config: TodoConfig, auth: AccountAppState<A>) -> Router
where
    R: TodoRepository + Clone + Send + Sync + 'static,
    A: AccountRepository + RevokedTokenRepository + Clone + Send + Sync + 'static,
{
    let state = TodoAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route("/add", post(handlers::add_todo::<R>))
        .route("/get", get(handlers::list_todos::<R>))
        .route("/update/{id}", patch(handlers::update_todo::<R>))
        .route("/complete/{id}", patch(handlers::complete_todo::<R>))
        .route("/delete/{id}", delete(handlers::delete_todo::<R>))
        .route_layer(middleware::from_fn_with_state(auth, require_auth::<A>));

    Router::new()
        .route("/get/{id}", get(handlers::get_todo::<R>))
        .merge(protected)
        .with_state(state)
}
