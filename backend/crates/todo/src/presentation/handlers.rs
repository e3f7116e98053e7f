//! HTTP Handlers

use account::AuthenticatedAccount;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::TodoId;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::TodoConfig;
use crate::application::{
    AddTodoInput, AddTodoUseCase, CompleteTodoUseCase, DeleteTodoUseCase, GetTodoUseCase,
    ListTodosUseCase, UpdateTodoInput, UpdateTodoUseCase,
};
use crate::domain::repository::TodoRepository;
use crate::error::TodoResult;
use crate::presentation::dto::{CreateTodoRequest, TodoResponse, UpdateTodoRequest};

/// Shared state for to-do handlers
#[derive(Clone)]
pub struct TodoAppState<R>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<TodoConfig>,
}

/// POST /todo/add
pub async fn add_todo<R>(
    State(state): State<TodoAppState<R>>,
    Extension(caller): Extension<AuthenticatedAccount>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> TodoResult<impl IntoResponse>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = AddTodoUseCase::new(state.repo.clone());

    let input = AddTodoInput {
        title: req.title,
        description: req.description,
        priority: req.priority,
        due_date: req.due_date,
        time: req.time,
    };

    let todo = use_case.execute(&caller, input).await?;

    Ok((StatusCode::CREATED, Json(TodoResponse::from(todo))))
}

/// GET /todo/get
pub async fn list_todos<R>(
    State(state): State<TodoAppState<R>>,
    Extension(caller): Extension<AuthenticatedAccount>,
) -> TodoResult<Json<Vec<TodoResponse>>>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListTodosUseCase::new(state.repo.clone());
    let todos = use_case.execute(&caller).await?;

    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// GET /todo/get/{id}
pub async fn get_todo<R>(
    State(state): State<TodoAppState<R>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> TodoResult<Json<TodoResponse>>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
{
    let Path(id) = path?;

    let use_case = GetTodoUseCase::new(state.repo.clone());
    let todo = use_case.execute(&TodoId::from_uuid(id)).await?;

    Ok(Json(TodoResponse::from(todo)))
}

/// PATCH /todo/update/{id}
pub async fn update_todo<R>(
    State(state): State<TodoAppState<R>>,
    Extension(caller): Extension<AuthenticatedAccount>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> TodoResult<Json<TodoResponse>>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
{
    let Path(id) = path?;
    let Json(req) = payload?;

    let use_case = UpdateTodoUseCase::new(state.repo.clone(), state.config.clone());

    let input = UpdateTodoInput {
        title: req.title,
        description: req.description,
        priority: req.priority,
        due_date: req.due_date,
        time: req.time,
    };

    let todo = use_case
        .execute(&caller, &TodoId::from_uuid(id), input)
        .await?;

    Ok(Json(TodoResponse::from(todo)))
}

/// PATCH /todo/complete/{id}
pub async fn complete_todo<R>(
    State(state): State<TodoAppState<R>>,
    Extension(caller): Extension<AuthenticatedAccount>,
    path: Result<Path<Uuid>, PathRejection>,
) -> TodoResult<Json<TodoResponse>>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
{
    let Path(id) = path?;

    let use_case = CompleteTodoUseCase::new(state.repo.clone(), state.config.clone());
    let todo = use_case.execute(&caller, &TodoId::from_uuid(id)).await?;

    Ok(Json(TodoResponse::from(todo)))
}

/// DELETE /todo/delete/{id}
pub async fn delete_todo<R>(
    State(state): State<TodoAppState<R>>,
    Extension(caller): Extension<AuthenticatedAccount>,
    path: Result<Path<Uuid>, PathRejection>,
) -> TodoResult<StatusCode>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
{
    let Path(id) = path?;

    let use_case = DeleteTodoUseCase::new(state.repo.clone(), state.config.clone());
    use_case.execute(&caller, &TodoId::from_uuid(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
