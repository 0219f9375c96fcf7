use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::SessionUser;
use crate::companies::service;
use crate::errors::AppError;
use crate::models::company::{Company, RegisterCompanyRequest, UpdateCompanyRequest};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CompanyPayload {
    pub company: Company,
}

#[derive(Serialize)]
pub struct CompaniesPayload {
    pub companies: Vec<Company>,
}

/// POST /api/v1/company/register
pub async fn handle_register_company(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Json(req): Json<RegisterCompanyRequest>,
) -> Result<Json<ApiResponse<CompanyPayload>>, AppError> {
    let company = service::register(state.store.as_ref(), user_id, req).await?;
    Ok(ApiResponse::with_message(
        "Company registered successfully.",
        CompanyPayload { company },
    ))
}

/// GET /api/v1/company/get
pub async fn handle_list_companies(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
) -> Result<Json<ApiResponse<CompaniesPayload>>, AppError> {
    let companies = service::list_owned(state.store.as_ref(), user_id).await?;
    Ok(ApiResponse::ok(CompaniesPayload { companies }))
}

/// GET /api/v1/company/get/:id
pub async fn handle_get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CompanyPayload>>, AppError> {
    let company = service::get(state.store.as_ref(), id).await?;
    Ok(ApiResponse::ok(CompanyPayload { company }))
}

/// PUT /api/v1/company/update/:id
pub async fn handle_update_company(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCompanyRequest>,
) -> Result<Json<ApiResponse<CompanyPayload>>, AppError> {
    let company = service::update(state.store.as_ref(), user_id, id, req).await?;
    Ok(ApiResponse::with_message(
        "Company information updated.",
        CompanyPayload { company },
    ))
}
