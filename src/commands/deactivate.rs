// ABOUTME: Deactivate command implementation.
// ABOUTME: Posts an inactive status to every given deployment.

use super::deployments::post_statuses;
use crate::client::PREVIEW_ACCEPT_HEADER;
use crate::config::Config;
use crate::error::Result;
use crate::model::NewStatus;
use crate::output::Output;
use crate::types::DeploymentId;

/// Mark every deployment in `ids` inactive. Returns how many were deactivated.
pub async fn deactivate_deployments(
    config: &Config,
    ids: &[DeploymentId],
    description: &str,
) -> Result<usize> {
    // Inactive statuses are only accepted under the preview media type.
    let client = config.client()?.with_accept_header(PREVIEW_ACCEPT_HEADER);
    post_statuses(&client, config, ids, &NewStatus::inactive(description)).await
}

pub async fn deactivate(
    config: &Config,
    ids: &[DeploymentId],
    description: &str,
    mut output: Output,
) -> Result<()> {
    output.start_timer();
    output.progress(&format!(
        "Deactivating {} deployment(s) in {}",
        ids.len(),
        config.repository
    ));

    let deactivated = deactivate_deployments(config, ids, description).await?;

    output.success(&format!("Deactivated {deactivated} deployment(s)"));
    Ok(())
}
