use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::auth::SessionUser;
use crate::errors::AppError;
use crate::models::user::{RegisterUserRequest, User};
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::users::profile::read_profile_update;
use crate::users::service;

#[derive(Serialize)]
pub struct UserPayload {
    pub user: User,
}

/// POST /api/v1/user/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterUserRequest>,
) -> Result<Json<ApiResponse<UserPayload>>, AppError> {
    let user = service::register(state.store.as_ref(), req).await?;
    Ok(ApiResponse::with_message(
        "Account created successfully.",
        UserPayload { user },
    ))
}

/// GET /api/v1/user/me
pub async fn handle_me(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
) -> Result<Json<ApiResponse<UserPayload>>, AppError> {
    let user = service::current_user(state.store.as_ref(), user_id).await?;
    Ok(ApiResponse::ok(UserPayload { user }))
}

/// POST /api/v1/user/profile/update
pub async fn handle_profile_update(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UserPayload>>, AppError> {
    let update = read_profile_update(multipart).await?;
    let user = service::update_profile(
        state.store.as_ref(),
        state.blobs.as_ref(),
        state.config.max_resume_bytes,
        user_id,
        update,
    )
    .await?;
    Ok(ApiResponse::with_message(
        "Profile updated successfully.",
        UserPayload { user },
    ))
}
