use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    state::AppState,
    store::Todo,
    todos::dto::{CreateTodoRequest, UpdateTodoRequest},
};

pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/:id", put(update_todo).delete(delete_todo))
}

#[instrument(skip(state))]
pub async fn list_todos(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.todos.list_by_user(user_id).await?;
    Ok(Json(todos))
}

#[instrument(skip(state, payload))]
pub async fn create_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let text = payload.text.trim();
    if text.is_empty() {
        warn!(user_id = %user_id, "create todo with empty text");
        return Err(ApiError::BadRequest("Text is required".into()));
    }

    let todo = state.todos.create(user_id, text).await?;
    info!(user_id = %user_id, todo_id = %todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

#[instrument(skip(state, payload))]
pub async fn update_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTodoRequest>,
) -> Result<Json<Todo>, ApiError> {
    let todo = owned_todo(&state, user_id, id).await?;

    let updated = state
        .todos
        .update(todo.id, payload.into())
        .await?
        .ok_or_else(|| ApiError::NotFound("Todo not found".into()))?;

    info!(user_id = %user_id, todo_id = %id, "todo updated");
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let todo = owned_todo(&state, user_id, id).await?;

    if !state.todos.delete(todo.id).await? {
        return Err(ApiError::NotFound("Todo not found".into()));
    }

    info!(user_id = %user_id, todo_id = %id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Fetches the todo and enforces the ownership rule: unknown id is 404,
/// someone else's todo is 401.
async fn owned_todo(state: &AppState, user_id: Uuid, id: Uuid) -> Result<Todo, ApiError> {
    let todo = state
        .todos
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Todo not found".into()))?;

    if todo.user_id != user_id {
        warn!(user_id = %user_id, todo_id = %id, owner = %todo.user_id, "todo ownership check failed");
        return Err(ApiError::Unauthorized("Not authorized".into()));
    }

    Ok(todo)
}
