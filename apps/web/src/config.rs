use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api/v1";
/// Requests still outstanding after this long are abandoned.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Default::default()
        }
    }

    /// Reads `JOBBOARD_API_BASE`, falling back to the local API.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        match std::env::var("JOBBOARD_API_BASE") {
            Ok(base) if !base.trim().is_empty() => Self::new(base.trim()),
            _ => Self::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    pub fn user_api_base(&self) -> String {
        format!("{}/user", self.base())
    }

    pub fn job_api_base(&self) -> String {
        format!("{}/job", self.base())
    }
}
