// ABOUTME: Deployment status records returned by the statuses endpoint.
// ABOUTME: Also defines the request body used when posting a new status.

use crate::types::{DeploymentState, StatusId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A timestamped state attached to a deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub id: StatusId,
    pub state: DeploymentState,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /repos/{repo}/deployments/{id}/statuses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewStatus {
    pub state: DeploymentState,
    pub description: String,
}

impl NewStatus {
    pub fn new(state: DeploymentState, description: impl Into<String>) -> Self {
        Self {
            state,
            description: description.into(),
        }
    }

    pub fn inactive(description: impl Into<String>) -> Self {
        Self::new(DeploymentState::Inactive, description)
    }
}
