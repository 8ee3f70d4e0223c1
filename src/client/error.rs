// ABOUTME: Error types for the GitHub API client.
// ABOUTME: Separates transport, unexpected-status, decode, and encode failures.

use thiserror::Error;

/// Client-related errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("client: error making http request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("client: GitHub api error - status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("client: error unmarshaling json response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("client: error marshaling request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("client: invalid url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// HTTP status of an unexpected response, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
