use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use super::build_router;
use crate::applications::transitions::TransitionPolicy;
use crate::auth::SESSION_COOKIE;
use crate::blobs::MemoryBlobStore;
use crate::config::Config;
use crate::state::AppState;
use crate::store::MemoryStore;

const BOUNDARY: &str = "jobboard-test-boundary";

fn app_with(policy: TransitionPolicy) -> Router {
    let mut config = Config::for_tests();
    config.transition_policy = policy;
    build_router(AppState {
        store: Arc::new(MemoryStore::new()),
        blobs: Arc::new(MemoryBlobStore::new()),
        config,
    })
}

fn app() -> Router {
    app_with(TransitionPolicy::Unrestricted)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: Method, uri: &str, user: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(user) = user {
        builder = builder.header(header::COOKIE, format!("{SESSION_COOKIE}={user}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(header::COOKIE, format!("{SESSION_COOKIE}={user}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Builds a multipart body from text fields plus an optional file part.
fn multipart_request(
    user: Option<&str>,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/user/profile/update")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(user) = user {
        builder = builder.header(header::COOKIE, format!("{SESSION_COOKIE}={user}"));
    }
    builder.body(Body::from(body)).unwrap()
}

async fn register(app: &Router, email: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/user/register",
            None,
            json!({ "fullname": "Test Person", "email": email, "phoneNumber": "555-010-0100", "role": role }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["user"]["id"].as_str().unwrap().to_string()
}

/// Registers a recruiter with a company and one job. Returns (recruiter, job id).
async fn seed_job(app: &Router) -> (String, String) {
    let recruiter = register(app, "recruiter@acme.test", "recruiter").await;
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/company/register",
            Some(recruiter.as_str()),
            json!({ "name": "Acme", "location": "India" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let company_id = body["company"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/job/post",
            Some(recruiter.as_str()),
            json!({
                "title": "Backend Engineer",
                "description": "Rust services",
                "requirements": ["Rust", "SQL"],
                "salary": 24,
                "location": "India",
                "jobType": "Part Time",
                "positions": 12,
                "companyId": company_id,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    (recruiter, body["job"]["id"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), empty_request(Method::GET, "/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn test_profile_update_returns_stored_user() {
    let app = app();
    let user = register(&app, "ada@example.com", "student").await;

    let (status, body) = send(
        &app,
        multipart_request(
            Some(user.as_str()),
            &[
                ("fullname", "Ada King"),
                ("email", ""),
                ("bio", "Analyst"),
                ("skills", "Go"),
                ("skills", "Rust"),
                ("skills", "C++"),
            ],
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Profile updated successfully.");
    assert_eq!(body["user"]["fullname"], "Ada King");
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["profile"]["skills"], json!(["Go", "Rust", "C++"]));

    let (_, me) = send(&app, empty_request(Method::GET, "/api/v1/user/me", Some(user.as_str()))).await;
    assert_eq!(me["user"], body["user"]);
}

#[tokio::test]
async fn test_profile_update_accepts_comma_joined_skills() {
    let app = app();
    let user = register(&app, "ada@example.com", "student").await;
    let (status, body) = send(
        &app,
        multipart_request(Some(user.as_str()), &[("skills", "Go, Rust , C++")], None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["profile"]["skills"], json!(["Go", "Rust", "C++"]));
}

#[tokio::test]
async fn test_profile_update_with_resume() {
    let app = app();
    let user = register(&app, "ada@example.com", "student").await;
    let (status, body) = send(
        &app,
        multipart_request(
            Some(user.as_str()),
            &[],
            Some(("ada.pdf", "application/pdf", &b"%PDF-1.4 test"[..])),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user"]["profile"]["resumeOriginalName"], "ada.pdf");
    assert!(body["user"]["profile"]["resume"]
        .as_str()
        .unwrap()
        .starts_with("resumes/"));
}

#[tokio::test]
async fn test_profile_update_rejects_non_pdf() {
    let app = app();
    let user = register(&app, "ada@example.com", "student").await;
    let (status, body) = send(
        &app,
        multipart_request(Some(user.as_str()), &[], Some(("ada.txt", "text/plain", &b"hello"[..]))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_profile_update_rejects_text_with_pdf_name() {
    let app = app();
    let user = register(&app, "ada@example.com", "student").await;
    let (status, body) = send(
        &app,
        multipart_request(Some(user.as_str()), &[], Some(("ada.pdf", "text/plain", &b"hello"[..]))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_profile_update_requires_session() {
    let (status, body) = send(&app(), multipart_request(None, &[("bio", "x")], None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authentication required");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = app();
    register(&app, "ada@example.com", "student").await;
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/user/register",
            None,
            json!({ "fullname": "Ada", "email": "ADA@example.com" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_job_listing_and_lookup() {
    let app = app();
    let (_, job_id) = seed_job(&app).await;

    let (status, body) = send(
        &app,
        empty_request(Method::GET, "/api/v1/job/get?keyword=backend", None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jobs"].as_array().unwrap().len(), 1);
    assert_eq!(body["jobs"][0]["company"]["name"], "Acme");

    let (status, body) = send(
        &app,
        empty_request(Method::GET, &format!("/api/v1/job/get/{job_id}"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["job"]["positions"], 12);

    let (status, body) = send(
        &app,
        empty_request(
            Method::GET,
            &format!("/api/v1/job/get/{}", Uuid::new_v4()),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_application_lifecycle_unrestricted() {
    let app = app();
    let (recruiter, job_id) = seed_job(&app).await;
    let applicant = register(&app, "student@uni.test", "student").await;

    let apply_uri = format!("/api/v1/application/apply/{job_id}");
    let (status, body) = send(&app, empty_request(Method::POST, &apply_uri, Some(applicant.as_str()))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["application"]["status"], "pending");
    assert_eq!(body["application"]["job"], job_id.as_str());
    assert_eq!(body["application"]["applicant"], applicant.as_str());
    let app_id = body["application"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, empty_request(Method::POST, &apply_uri, Some(applicant.as_str()))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let status_uri = format!("/api/v1/application/status/{app_id}/update");
    for next in ["accepted", "pending"] {
        let (status, body) = send(
            &app,
            json_request(Method::POST, &status_uri, Some(recruiter.as_str()), json!({ "status": next })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["application"]["status"], next);
    }

    let (status, body) = send(
        &app,
        empty_request(
            Method::GET,
            &format!("/api/v1/application/{job_id}/applicants"),
            Some(recruiter.as_str()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["applications"][0]["applicantDetails"]["email"],
        "student@uni.test"
    );

    let (status, body) = send(
        &app,
        empty_request(Method::GET, "/api/v1/application/get", Some(applicant.as_str())),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applications"][0]["jobDetails"]["title"], "Backend Engineer");
}

#[tokio::test]
async fn test_guarded_policy_rejects_reopening() {
    let app = app_with(TransitionPolicy::Guarded);
    let (recruiter, job_id) = seed_job(&app).await;
    let applicant = register(&app, "student@uni.test", "student").await;

    let (_, body) = send(
        &app,
        empty_request(
            Method::POST,
            &format!("/api/v1/application/apply/{job_id}"),
            Some(applicant.as_str()),
        ),
    )
    .await;
    let app_id = body["application"]["id"].as_str().unwrap().to_string();
    let status_uri = format!("/api/v1/application/status/{app_id}/update");

    let (status, _) = send(
        &app,
        json_request(Method::POST, &status_uri, Some(recruiter.as_str()), json!({ "status": "rejected" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        json_request(Method::POST, &status_uri, Some(recruiter.as_str()), json!({ "status": "pending" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_apply_to_missing_job() {
    let app = app();
    let applicant = register(&app, "student@uni.test", "student").await;
    let (status, _) = send(
        &app,
        empty_request(
            Method::POST,
            &format!("/api/v1/application/apply/{}", Uuid::new_v4()),
            Some(applicant.as_str()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_job_removes_applications() {
    let app = app();
    let (recruiter, job_id) = seed_job(&app).await;
    let applicant = register(&app, "student@uni.test", "student").await;
    send(
        &app,
        empty_request(
            Method::POST,
            &format!("/api/v1/application/apply/{job_id}"),
            Some(applicant.as_str()),
        ),
    )
    .await;

    let (status, _) = send(
        &app,
        empty_request(
            Method::DELETE,
            &format!("/api/v1/job/delete/{job_id}"),
            Some(recruiter.as_str()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app,
        empty_request(Method::GET, "/api/v1/application/get", Some(applicant.as_str())),
    )
    .await;
    assert!(body["applications"].as_array().unwrap().is_empty());
}
