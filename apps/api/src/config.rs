use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::applications::transitions::TransitionPolicy;

const DEFAULT_MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageBackend::Postgres => "postgres",
            StorageBackend::Memory => "memory",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("STORAGE_BACKEND must be 'postgres' or 'memory', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Application configuration loaded from environment variables.
/// Startup fails if variables required by the selected backend are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub s3: Option<S3Settings>,
    pub port: u16,
    pub rust_log: String,
    pub transition_policy: TransitionPolicy,
    pub max_resume_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let storage = match lookup("STORAGE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => StorageBackend::Postgres,
        };

        let (database_url, s3) = match storage {
            StorageBackend::Postgres => (
                Some(require("DATABASE_URL")?),
                Some(S3Settings {
                    bucket: require("S3_BUCKET")?,
                    endpoint: require("S3_ENDPOINT")?,
                    access_key_id: require("AWS_ACCESS_KEY_ID")?,
                    secret_access_key: require("AWS_SECRET_ACCESS_KEY")?,
                }),
            ),
            StorageBackend::Memory => (None, None),
        };

        Ok(Config {
            storage,
            database_url,
            s3,
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            transition_policy: match lookup("APPLICATION_TRANSITIONS") {
                Some(raw) => raw
                    .parse()
                    .map_err(|e: String| anyhow!(e))
                    .context("APPLICATION_TRANSITIONS is invalid")?,
                None => TransitionPolicy::default(),
            },
            max_resume_bytes: match lookup("MAX_RESUME_BYTES") {
                Some(raw) => raw
                    .parse()
                    .context("MAX_RESUME_BYTES must be a byte count")?,
                None => DEFAULT_MAX_RESUME_BYTES,
            },
        })
    }

    /// Configuration for tests: in-memory storage, default limits.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            storage: StorageBackend::Memory,
            database_url: None,
            s3: None,
            port: 0,
            rust_log: "debug".to_string(),
            transition_policy: TransitionPolicy::default(),
            max_resume_bytes: DEFAULT_MAX_RESUME_BYTES,
        }
    }
}
