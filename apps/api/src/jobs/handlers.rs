use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::SessionUser;
use crate::errors::AppError;
use crate::jobs::service;
use crate::models::job::{JobQuery, JobView, PostJobRequest, UpdateJobRequest};
use crate::response::{ApiResponse, Empty};
use crate::state::AppState;

#[derive(Serialize)]
pub struct JobPayload {
    pub job: JobView,
}

#[derive(Serialize)]
pub struct JobsPayload {
    pub jobs: Vec<JobView>,
}

/// POST /api/v1/job/post
pub async fn handle_post_job(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Json(req): Json<PostJobRequest>,
) -> Result<Json<ApiResponse<JobPayload>>, AppError> {
    let job = service::post(state.store.as_ref(), user_id, req).await?;
    Ok(ApiResponse::with_message(
        "New job created successfully.",
        JobPayload { job },
    ))
}

/// GET /api/v1/job/get?keyword=
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> Result<Json<ApiResponse<JobsPayload>>, AppError> {
    let jobs = service::list(state.store.as_ref(), query.keyword.as_deref()).await?;
    Ok(ApiResponse::ok(JobsPayload { jobs }))
}

/// GET /api/v1/job/get/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<JobPayload>>, AppError> {
    let job = service::get(state.store.as_ref(), id).await?;
    Ok(ApiResponse::ok(JobPayload { job }))
}

/// GET /api/v1/job/admin
pub async fn handle_admin_jobs(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
) -> Result<Json<ApiResponse<JobsPayload>>, AppError> {
    let jobs = service::list_posted(state.store.as_ref(), user_id).await?;
    Ok(ApiResponse::ok(JobsPayload { jobs }))
}

/// PUT /api/v1/job/update/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateJobRequest>,
) -> Result<Json<ApiResponse<JobPayload>>, AppError> {
    let job = service::update(state.store.as_ref(), user_id, id, req).await?;
    Ok(ApiResponse::with_message("Job updated.", JobPayload { job }))
}

/// DELETE /api/v1/job/delete/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Empty>>, AppError> {
    service::delete(state.store.as_ref(), user_id, id).await?;
    Ok(ApiResponse::with_message("Job deleted.", Empty {}))
}
