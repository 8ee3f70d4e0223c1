// ABOUTME: List command implementation.
// ABOUTME: Fetches deployments, optionally their last statuses, and filters by state.

use super::deployments::{fetch_deployments, fetch_statuses};
use crate::config::Config;
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::Result;
use crate::model::Deployments;
use crate::output::Output;
use crate::types::{DeploymentId, DeploymentState};

pub const DEFAULT_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub struct ListOptions {
    /// How many deployments to request.
    pub limit: u32,
    pub environment: Option<String>,
    /// Keep only deployments whose last status is this state.
    pub state: Option<DeploymentState>,
    /// Fetch last statuses even without a state filter.
    pub include_statuses: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            environment: None,
            state: None,
            include_statuses: false,
        }
    }
}

/// Resolve the deployments the list command would show.
pub async fn list_deployments(
    config: &Config,
    options: &ListOptions,
    diag: &mut Diagnostics,
) -> Result<Deployments> {
    let client = config.client()?;

    let mut deployments = fetch_deployments(
        &client,
        config,
        options.limit,
        options.environment.as_deref(),
    )
    .await?;

    if options.include_statuses || options.state.is_some() {
        fetch_statuses(&client, config, &mut deployments).await?;
    }

    if let Some(state) = options.state {
        let missing: Vec<DeploymentId> = deployments
            .iter()
            .filter(|d| d.status.is_none())
            .map(|d| d.id)
            .collect();
        if !missing.is_empty() {
            diag.warn(Warning::missing_status(&missing));
        }
        deployments = deployments.filter_by_state(state);
    }

    Ok(deployments)
}

pub async fn list(config: &Config, options: &ListOptions, output: Output) -> Result<()> {
    let mut diag = Diagnostics::default();

    let deployments = list_deployments(config, options, &mut diag).await?;
    output.deployments(&deployments)?;

    for warning in diag.warnings() {
        output.warning(&warning.message);
    }
    Ok(())
}
