pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::applications::handlers as applications;
use crate::companies::handlers as companies;
use crate::jobs::handlers as jobs;
use crate::state::AppState;
use crate::users::handlers as users;

/// Headroom above the resume limit for the text fields of the profile form.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_resume_bytes + FORM_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Users
        .route("/api/v1/user/register", post(users::handle_register))
        .route("/api/v1/user/me", get(users::handle_me))
        .route(
            "/api/v1/user/profile/update",
            post(users::handle_profile_update),
        )
        // Companies
        .route(
            "/api/v1/company/register",
            post(companies::handle_register_company),
        )
        .route("/api/v1/company/get", get(companies::handle_list_companies))
        .route("/api/v1/company/get/:id", get(companies::handle_get_company))
        .route(
            "/api/v1/company/update/:id",
            put(companies::handle_update_company),
        )
        // Jobs
        .route("/api/v1/job/post", post(jobs::handle_post_job))
        .route("/api/v1/job/get", get(jobs::handle_list_jobs))
        .route("/api/v1/job/get/:id", get(jobs::handle_get_job))
        .route("/api/v1/job/admin", get(jobs::handle_admin_jobs))
        .route("/api/v1/job/update/:id", put(jobs::handle_update_job))
        .route("/api/v1/job/delete/:id", delete(jobs::handle_delete_job))
        // Applications
        .route(
            "/api/v1/application/apply/:job_id",
            post(applications::handle_apply),
        )
        .route(
            "/api/v1/application/get",
            get(applications::handle_applied_jobs),
        )
        .route(
            "/api/v1/application/get/:id",
            get(applications::handle_get_application),
        )
        .route(
            "/api/v1/application/:job_id/applicants",
            get(applications::handle_applicants),
        )
        .route(
            "/api/v1/application/status/:id/update",
            post(applications::handle_update_status),
        )
        .route(
            "/api/v1/application/delete/:id",
            delete(applications::handle_delete_application),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests;
