// ABOUTME: Update-by-state command implementation.
// ABOUTME: Moves every deployment whose last status matches a state to a new state.

use super::deployments::{fetch_deployments, fetch_statuses, post_statuses};
use super::list::DEFAULT_LIMIT;
use super::update::require_new_state;
use crate::client::PREVIEW_ACCEPT_HEADER;
use crate::config::Config;
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::Result;
use crate::model::NewStatus;
use crate::output::Output;
use crate::types::{DeploymentId, DeploymentState};

#[derive(Debug, Clone)]
pub struct UpdateByStateOptions {
    /// Only deployments whose last status is this state are touched.
    pub state: DeploymentState,
    pub new_state: Option<DeploymentState>,
    pub description: String,
    /// Never touch this deployment.
    pub except: Option<DeploymentId>,
    pub limit: u32,
    pub environment: Option<String>,
}

impl Default for UpdateByStateOptions {
    fn default() -> Self {
        Self {
            state: DeploymentState::Success,
            new_state: None,
            description: String::new(),
            except: None,
            limit: DEFAULT_LIMIT,
            environment: None,
        }
    }
}

/// Resolve the matching deployments and post the new state to them.
///
/// Filtering and the `except` exclusion happen before any status is posted.
/// Returns the ids that were updated, in listing order.
pub async fn update_by_state_deployments(
    config: &Config,
    options: &UpdateByStateOptions,
    diag: &mut Diagnostics,
) -> Result<Vec<DeploymentId>> {
    let new_state = require_new_state(options.new_state)?;
    let client = config.client()?.with_accept_header(PREVIEW_ACCEPT_HEADER);

    let mut deployments = fetch_deployments(
        &client,
        config,
        options.limit,
        options.environment.as_deref(),
    )
    .await?;
    fetch_statuses(&client, config, &mut deployments).await?;

    let mut ids = deployments.filter_by_state(options.state).ids();
    if let Some(except) = options.except {
        let before = ids.len();
        ids.retain(|id| *id != except);
        if ids.len() == before {
            diag.warn(Warning::except_not_targeted(except));
        }
    }

    post_statuses(
        &client,
        config,
        &ids,
        &NewStatus::new(new_state, options.description.as_str()),
    )
    .await?;
    Ok(ids)
}

pub async fn update_by_state(
    config: &Config,
    options: &UpdateByStateOptions,
    mut output: Output,
) -> Result<()> {
    let new_state = require_new_state(options.new_state)?;
    let mut diag = Diagnostics::default();

    output.start_timer();
    output.progress(&format!(
        "Moving {} deployments in {} to {new_state}",
        options.state, config.repository
    ));

    let updated = update_by_state_deployments(config, options, &mut diag).await?;

    for warning in diag.warnings() {
        output.warning(&warning.message);
    }
    output.success(&format!(
        "Updated {} deployment(s) to {new_state}",
        updated.len()
    ));
    Ok(())
}
