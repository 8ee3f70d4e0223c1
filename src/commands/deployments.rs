// ABOUTME: Shared deployment API calls used by every command.
// ABOUTME: Wraps single requests and their fan-out over many deployments.

use crate::client::{ApiClient, ClientError, Query};
use crate::config::Config;
use crate::error::Result;
use crate::model::{Deployments, NewStatus, Status};
use crate::types::DeploymentId;

/// List deployments of the configured repository, newest first.
///
/// `limit` is sent as `per_page`, the page size GitHub honours for this endpoint.
pub async fn fetch_deployments(
    client: &ApiClient,
    config: &Config,
    limit: u32,
    environment: Option<&str>,
) -> std::result::Result<Deployments, ClientError> {
    let mut query = Query::new();
    query.insert("per_page".to_string(), limit.to_string());
    if let Some(environment) = environment.filter(|e| !e.is_empty()) {
        query.insert("environment".to_string(), environment.to_string());
    }

    client.get(&config.deployments_path(), &query).await
}

fn statuses_path(config: &Config, id: DeploymentId) -> String {
    format!("{}/{}/statuses", config.deployments_path(), id)
}

/// Most recent status of a deployment, or `None` if it has none yet.
pub async fn fetch_last_status(
    client: &ApiClient,
    config: &Config,
    id: DeploymentId,
) -> std::result::Result<Option<Status>, ClientError> {
    let mut query = Query::new();
    query.insert("per_page".to_string(), "1".to_string());

    let statuses: Vec<Status> = client.get(&statuses_path(config, id), &query).await?;
    Ok(statuses.into_iter().next())
}

/// Fill in the last status of every deployment concurrently.
///
/// Nothing is assigned unless every lookup succeeded.
pub async fn fetch_statuses(
    client: &ApiClient,
    config: &Config,
    deployments: &mut Deployments,
) -> Result<()> {
    let statuses = config
        .fan_out()
        .run(deployments.ids(), |id| fetch_last_status(client, config, id))
        .await?;

    for (deployment, status) in deployments.iter_mut().zip(statuses) {
        deployment.status = status;
    }
    Ok(())
}

pub async fn post_status(
    client: &ApiClient,
    config: &Config,
    id: DeploymentId,
    status: &NewStatus,
) -> std::result::Result<(), ClientError> {
    client.post(&statuses_path(config, id), status).await
}

/// Post the same status to every deployment concurrently.
///
/// Returns the number of deployments updated.
pub async fn post_statuses(
    client: &ApiClient,
    config: &Config,
    ids: &[DeploymentId],
    status: &NewStatus,
) -> Result<usize> {
    let done = config
        .fan_out()
        .run(ids.iter().copied(), |id| post_status(client, config, id, status))
        .await?;
    Ok(done.len())
}
