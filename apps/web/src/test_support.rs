//! Fixtures and stubbed API responses for client tests.

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::models::{Company, Job, Profile, User};

pub(crate) const PROFILE_PATH: &str = "/api/v1/user/profile/update";

pub(crate) fn sample_user() -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        fullname: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        phone_number: "+91 98765 43210".to_string(),
        role: "student".to_string(),
        profile: Profile {
            bio: "Backend developer".to_string(),
            skills: vec!["Go".to_string(), "SQL".to_string()],
            resume: None,
            resume_original_name: None,
        },
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn sample_job() -> Job {
    let company_id = Uuid::new_v4();
    Job {
        id: Uuid::new_v4(),
        title: "Backend Engineer".to_string(),
        description: "Build REST services in Rust".to_string(),
        requirements: vec!["Rust".to_string(), "SQL".to_string()],
        salary: 24.0,
        location: "India".to_string(),
        job_type: "Part Time".to_string(),
        experience_level: 2,
        positions: 12,
        company_id,
        created_at: Utc::now(),
        company: Some(Company {
            id: company_id,
            name: "Acme".to_string(),
            description: None,
            website: None,
            location: Some("India".to_string()),
            logo: None,
        }),
    }
}

pub(crate) fn api_base(server: &MockServer) -> String {
    format!("{}/api/v1", server.uri())
}

/// Base URL of a port nothing listens on.
pub(crate) async fn closed_base() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/v1")
}

pub(crate) fn profile_updated(user: &User) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "message": "Profile updated successfully.",
        "user": user,
    }))
}

/// Answers the profile endpoint with `user` when the request carries that
/// user's session cookie, and with the API's 401 body otherwise.
pub(crate) async fn mount_profile_update(server: &MockServer, user: &User) {
    Mock::given(method("POST"))
        .and(path(PROFILE_PATH))
        .and(header("cookie", format!("user_id={}", user.id).as_str()))
        .respond_with(profile_updated(user))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(PROFILE_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "code": "UNAUTHORIZED",
            "message": "Authentication required",
        })))
        .mount(server)
        .await;
}

/// Body of the most recent request the server saw.
pub(crate) async fn last_body(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap_or_default();
    requests
        .last()
        .map(|r| String::from_utf8_lossy(&r.body).into_owned())
        .unwrap_or_default()
}
