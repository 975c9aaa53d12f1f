use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{auth::dto::PublicUser, auth::jwt::AdminUser, error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct SetBlockedRequest {
    pub is_blocked: bool,
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/:id/block", patch(set_blocked))
}

#[instrument(skip(state, _admin))]
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip(state, admin, payload))]
pub async fn set_blocked(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetBlockedRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = state
        .users
        .set_blocked(id, payload.is_blocked)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    info!(
        admin_id = %admin.0.id,
        user_id = %user.id,
        is_blocked = user.is_blocked,
        "user block flag updated"
    );
    Ok(Json(user.into()))
}
