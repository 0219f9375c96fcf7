use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::applications::service;
use crate::auth::SessionUser;
use crate::errors::AppError;
use crate::models::application::{Application, AppliedJob, JobApplicant, StatusUpdateRequest};
use crate::response::{ApiResponse, Empty};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ApplicationPayload {
    pub application: Application,
}

#[derive(Serialize)]
pub struct AppliedJobsPayload {
    pub applications: Vec<AppliedJob>,
}

#[derive(Serialize)]
pub struct ApplicantsPayload {
    pub applications: Vec<JobApplicant>,
}

/// POST /api/v1/application/apply/:job_id
pub async fn handle_apply(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ApplicationPayload>>, AppError> {
    let application = service::apply(state.store.as_ref(), user_id, job_id).await?;
    Ok(ApiResponse::with_message(
        "Job applied successfully.",
        ApplicationPayload { application },
    ))
}

/// GET /api/v1/application/get
pub async fn handle_applied_jobs(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
) -> Result<Json<ApiResponse<AppliedJobsPayload>>, AppError> {
    let applications = service::list_for_applicant(state.store.as_ref(), user_id).await?;
    Ok(ApiResponse::ok(AppliedJobsPayload { applications }))
}

/// GET /api/v1/application/get/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ApplicationPayload>>, AppError> {
    let application = service::get(state.store.as_ref(), user_id, id).await?;
    Ok(ApiResponse::ok(ApplicationPayload { application }))
}

/// GET /api/v1/application/:job_id/applicants
pub async fn handle_applicants(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ApplicantsPayload>>, AppError> {
    let applications = service::list_for_job(state.store.as_ref(), user_id, job_id).await?;
    Ok(ApiResponse::ok(ApplicantsPayload { applications }))
}

/// POST /api/v1/application/status/:id/update
pub async fn handle_update_status(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<ApplicationPayload>>, AppError> {
    let application = service::update_status(
        state.store.as_ref(),
        state.config.transition_policy,
        user_id,
        id,
        &req.status,
    )
    .await?;
    Ok(ApiResponse::with_message(
        "Status updated successfully.",
        ApplicationPayload { application },
    ))
}

/// DELETE /api/v1/application/delete/:id
pub async fn handle_delete_application(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Empty>>, AppError> {
    service::delete(state.store.as_ref(), user_id, id).await?;
    Ok(ApiResponse::with_message("Application deleted.", Empty {}))
}
