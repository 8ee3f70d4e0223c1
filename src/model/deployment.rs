// ABOUTME: Deployment records and the list wrapper used by commands.
// ABOUTME: Handles JSON decoding, state filtering, and one-line formatting.

use super::Status;
use crate::types::{DeploymentId, DeploymentState};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
}

/// The API sends `null` for deleted or ghost accounts.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A deployment as returned by `GET /repos/{repo}/deployments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: DeploymentId,
    #[serde(default)]
    pub url: String,
    pub sha: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub environment: String,
    pub created_at: DateTime<Utc>,
    /// Empty login when the API has no creator for the deployment.
    #[serde(default, deserialize_with = "null_as_default")]
    pub creator: User,
    /// Last known status, filled in by a separate request.
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl Deployment {
    pub fn state(&self) -> Option<DeploymentState> {
        self.status.as_ref().map(|s| s.state)
    }

    fn short_sha(&self) -> &str {
        self.sha.get(..8).unwrap_or(&self.sha)
    }
}

impl fmt::Display for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if let Some(state) = self.state() {
            write!(f, " - {state}")?;
        }
        write!(
            f,
            " - {} ({}) in {} at {} by {}",
            self.git_ref,
            self.short_sha(),
            self.environment,
            self.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.creator.login
        )
    }
}

/// Ordered list of deployments, newest first as the API returns them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deployments(Vec<Deployment>);

impl Deployments {
    pub fn new(deployments: Vec<Deployment>) -> Self {
        Self(deployments)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Deployment> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Deployment> {
        self.0.iter_mut()
    }

    pub fn ids(&self) -> Vec<DeploymentId> {
        self.0.iter().map(|d| d.id).collect()
    }

    /// Keep only deployments whose last known status is `state`.
    ///
    /// Deployments without a fetched status never match. Input order is kept.
    pub fn filter_by_state(self, state: DeploymentState) -> Self {
        Self(
            self.0
                .into_iter()
                .filter(|d| d.state() == Some(state))
                .collect(),
        )
    }

    pub fn into_inner(self) -> Vec<Deployment> {
        self.0
    }
}

impl From<Vec<Deployment>> for Deployments {
    fn from(deployments: Vec<Deployment>) -> Self {
        Self(deployments)
    }
}

impl IntoIterator for Deployments {
    type Item = Deployment;
    type IntoIter = std::vec::IntoIter<Deployment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Deployments {
    type Item = &'a Deployment;
    type IntoIter = std::slice::Iter<'a, Deployment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Deployments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("No deployments");
        }
        for (i, deployment) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{deployment}")?;
        }
        Ok(())
    }
}
