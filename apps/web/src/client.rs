use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::jobs::JobLookup;
use crate::models::{ErrorBody, Job, JobEnvelope, JobsEnvelope, ProfileUpdateResponse};
use crate::profile::ProfileUpdateRequest;

/// Name of the session cookie the API reads.
pub const SESSION_COOKIE: &str = "user_id";

/// REST client for the job board API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::RequestSetup(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Multipart POST to `{user api}/profile/update`, authenticated with the
    /// session credential when one is present.
    pub async fn update_profile(
        &self,
        credential: Option<Uuid>,
        request: &ProfileUpdateRequest,
    ) -> Result<ProfileUpdateResponse, ClientError> {
        let url = format!("{}/profile/update", self.config.user_api_base());
        let form = request.to_multipart()?;
        debug!(%url, skills = request.skills.len(), resume = request.resume.is_some(), "submitting profile update");

        let mut builder = self.http.post(&url).multipart(form);
        if let Some(id) = credential {
            builder = builder.header(header::COOKIE, format!("{SESSION_COOKIE}={id}"));
        }

        let response = builder.send().await.map_err(|e| {
            error!("profile update request failed: {e}");
            ClientError::from_transport(e)
        })?;
        read_json(response).await
    }

    /// Fetches one job by id. A 404 is an answer, not an error.
    pub async fn fetch_job(&self, job_id: &str) -> Result<JobLookup, ClientError> {
        let url = format!("{}/get/{job_id}", self.config.job_api_base());
        debug!(%url, "fetching job");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ClientError::from_transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(JobLookup::NotFound);
        }
        let envelope: JobEnvelope = read_json(response).await?;
        Ok(JobLookup::Found(envelope.job))
    }

    pub async fn list_jobs(&self, keyword: Option<&str>) -> Result<Vec<Job>, ClientError> {
        let url = format!("{}/get", self.config.job_api_base());
        let mut builder = self.http.get(&url);
        if let Some(keyword) = keyword.map(str::trim).filter(|k| !k.is_empty()) {
            builder = builder.query(&[("keyword", keyword)]);
        }

        let response = builder.send().await.map_err(ClientError::from_transport)?;
        let envelope: JobsEnvelope = read_json(response).await?;
        Ok(envelope.jobs)
    }
}

/// Non-2xx statuses become `ClientError::Server` carrying the body's
/// `message` if it has one.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await.map_err(ClientError::from_transport)?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .unwrap_or_default()
            .message;
        error!(status = status.as_u16(), ?message, "server returned an error");
        return Err(ClientError::Server {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&body).map_err(|e| {
        error!("unreadable response body: {e}");
        ClientError::Server {
            status: status.as_u16(),
            message: None,
        }
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::error::{NO_RESPONSE_MESSAGE, REQUEST_SETUP_MESSAGE};
    use crate::test_support::{
        api_base, closed_base, last_body, mount_profile_update, profile_updated, sample_job,
        sample_user, PROFILE_PATH,
    };

    fn client(base: String) -> ApiClient {
        ApiClient::new(ClientConfig::new(base)).unwrap()
    }

    fn text_request() -> ProfileUpdateRequest {
        ProfileUpdateRequest {
            fullname: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone_number: "+91 98765 43210".to_string(),
            bio: "Backend developer".to_string(),
            skills: vec!["Go".to_string(), "Rust".to_string(), "C++".to_string()],
            resume: None,
        }
    }

    #[tokio::test]
    async fn test_update_profile_returns_server_user() {
        let server = MockServer::start().await;
        let user = sample_user();
        mount_profile_update(&server, &user).await;

        let response = client(api_base(&server))
            .update_profile(Some(user.id), &text_request())
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.message, "Profile updated successfully.");
        assert_eq!(response.user, Some(user));
    }

    #[tokio::test]
    async fn test_update_profile_sends_each_skill_as_a_part() {
        let server = MockServer::start().await;
        let user = sample_user();
        mount_profile_update(&server, &user).await;

        client(api_base(&server))
            .update_profile(Some(user.id), &text_request())
            .await
            .unwrap();

        let body = last_body(&server).await;
        assert_eq!(body.matches("name=\"skills\"").count(), 3);
        assert!(body.contains("name=\"phoneNumber\""));
        assert!(!body.contains("Go, Rust"));
        assert!(!body.contains("name=\"file\""));
    }

    #[tokio::test]
    async fn test_update_profile_without_credential_is_server_error() {
        let server = MockServer::start().await;
        mount_profile_update(&server, &sample_user()).await;

        let err = client(api_base(&server))
            .update_profile(None, &text_request())
            .await
            .unwrap_err();

        match &err {
            ClientError::Server { status, message } => {
                assert_eq!(*status, 401);
                assert_eq!(message.as_deref(), Some("Authentication required"));
            }
            other => panic!("expected server error, got {other:?}"),
        }
        assert_eq!(err.user_message(), "Authentication required");
    }

    #[tokio::test]
    async fn test_error_without_message_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PROFILE_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let err = client(api_base(&server))
            .update_profile(None, &text_request())
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Server { status: 500, message: None }));
        assert_eq!(err.user_message(), "An error occurred. Please try again.");
    }

    #[tokio::test]
    async fn test_slow_server_is_no_response() {
        let server = MockServer::start().await;
        let user = sample_user();
        Mock::given(method("POST"))
            .and(path(PROFILE_PATH))
            .respond_with(profile_updated(&user).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;
        let api = ApiClient::new(
            ClientConfig::new(api_base(&server)).with_timeout(Duration::from_millis(50)),
        )
        .unwrap();

        let err = api
            .update_profile(Some(user.id), &text_request())
            .await
            .unwrap_err();

        assert!(matches!(&err, ClientError::NoResponse(e) if e.is_timeout()));
        assert_eq!(err.user_message(), NO_RESPONSE_MESSAGE);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_no_response() {
        let err = client(closed_base().await)
            .update_profile(None, &text_request())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NoResponse(_)));
    }

    #[tokio::test]
    async fn test_malformed_base_is_setup_error() {
        let err = client("not a url".to_string())
            .update_profile(None, &text_request())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::RequestSetup(_)));
        assert_eq!(err.user_message(), REQUEST_SETUP_MESSAGE);
    }

    #[tokio::test]
    async fn test_fetch_job_found_and_missing() {
        let server = MockServer::start().await;
        let job = sample_job();
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/job/get/{}", job.id)))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "job": job })),
            )
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "code": "NOT_FOUND",
                "message": "Job not found",
            })))
            .mount(&server)
            .await;
        let api = client(api_base(&server));

        match api.fetch_job(&job.id.to_string()).await.unwrap() {
            JobLookup::Found(found) => {
                assert_eq!(found.title, job.title);
                assert_eq!(found.company.unwrap().name, "Acme");
            }
            JobLookup::NotFound => panic!("job should exist"),
        }

        let missing = api.fetch_job(&Uuid::new_v4().to_string()).await.unwrap();
        assert_eq!(missing, JobLookup::NotFound);
    }

    #[tokio::test]
    async fn test_fetch_job_unreachable() {
        let err = client(closed_base().await).fetch_job("abc123").await.unwrap_err();
        assert!(matches!(err, ClientError::NoResponse(_)));
    }

    #[tokio::test]
    async fn test_list_jobs_passes_keyword() {
        let server = MockServer::start().await;
        let job = sample_job();
        Mock::given(method("GET"))
            .and(path("/api/v1/job/get"))
            .and(query_param("keyword", "designer"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "jobs": [] })),
            )
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/job/get"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "jobs": [job.clone()] })),
            )
            .mount(&server)
            .await;
        let api = client(api_base(&server));

        let all = api.list_jobs(None).await.unwrap();
        assert_eq!(all, vec![job]);
        assert!(api.list_jobs(Some(" designer ")).await.unwrap().is_empty());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
        assert_eq!(requests[1].url.query(), Some("keyword=designer"));
    }
}
