use thiserror::Error;

pub const GENERIC_SERVER_MESSAGE: &str = "An error occurred. Please try again.";
pub const NO_RESPONSE_MESSAGE: &str = "No response from the server. Please try again later.";
pub const REQUEST_SETUP_MESSAGE: &str = "Error in setting up the request.";

/// Why a request failed, in the three ways a caller can tell apart.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an error status.
    #[error("server responded with status {status}")]
    Server { status: u16, message: Option<String> },

    /// The request went out but no answer arrived (timeout, connection failure).
    #[error("no response from server: {0}")]
    NoResponse(#[source] reqwest::Error),

    /// The request could not be built or its inputs could not be read.
    #[error("request setup failed: {0}")]
    RequestSetup(String),
}

impl ClientError {
    /// Builder errors never reach the network; everything else did.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ClientError::RequestSetup(err.to_string())
        } else {
            ClientError::NoResponse(err)
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ClientError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ClientError::Server { .. } => GENERIC_SERVER_MESSAGE.to_string(),
            ClientError::NoResponse(_) => NO_RESPONSE_MESSAGE.to_string(),
            ClientError::RequestSetup(_) => REQUEST_SETUP_MESSAGE.to_string(),
        }
    }
}
