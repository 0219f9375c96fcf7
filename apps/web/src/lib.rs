//! Client side of the job board: REST client, client-held user session,
//! job listing view-models and the profile-update dialog.

pub mod client;
pub mod config;
pub mod error;
pub mod jobs;
pub mod models;
pub mod notice;
pub mod profile;
pub mod session;
pub mod skills;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use session::UserSession;

#[cfg(test)]
pub(crate) mod test_support;
