// ABOUTME: Application-wide error types for github-deployments.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::client::ClientError;
use crate::fanout::BatchError;
use crate::types::DeploymentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A required input was missing or malformed; nothing was sent.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Batch(#[from] BatchError<DeploymentId, ClientError>),

    #[error("output: {0}")]
    Output(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
