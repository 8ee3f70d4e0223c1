// ABOUTME: Update command implementation.
// ABOUTME: Posts a new status to every given deployment.

use super::deployments::post_statuses;
use crate::client::PREVIEW_ACCEPT_HEADER;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::NewStatus;
use crate::output::Output;
use crate::types::{DeploymentId, DeploymentState};

/// Fail fast when no target state was given.
pub(crate) fn require_new_state(new_state: Option<DeploymentState>) -> Result<DeploymentState> {
    new_state.ok_or_else(|| {
        Error::validation("missing new state - provide one with flag --new-state")
    })
}

/// Set `new_state` on every deployment in `ids`. Returns how many were updated.
pub async fn update_deployments(
    config: &Config,
    ids: &[DeploymentId],
    new_state: Option<DeploymentState>,
    description: &str,
) -> Result<usize> {
    let new_state = require_new_state(new_state)?;
    let client = config.client()?.with_accept_header(PREVIEW_ACCEPT_HEADER);

    post_statuses(
        &client,
        config,
        ids,
        &NewStatus::new(new_state, description),
    )
    .await
}

pub async fn update(
    config: &Config,
    ids: &[DeploymentId],
    new_state: Option<DeploymentState>,
    description: &str,
    mut output: Output,
) -> Result<()> {
    let new_state = require_new_state(new_state)?;

    output.start_timer();
    output.progress(&format!(
        "Setting {} deployment(s) in {} to {new_state}",
        ids.len(),
        config.repository
    ));

    let updated = update_deployments(config, ids, Some(new_state), description).await?;

    output.success(&format!("Updated {updated} deployment(s) to {new_state}"));
    Ok(())
}
