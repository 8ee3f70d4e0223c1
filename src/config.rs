// ABOUTME: Explicit per-invocation configuration for github-deployments.
// ABOUTME: Validates repository and token before any command touches the network.

use crate::client::{ApiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::error::{Error, Result};
use crate::fanout::{DEFAULT_CONCURRENCY, FanOut};
use crate::types::RepoSlug;
use std::fmt;
use std::num::NonZeroUsize;
use std::time::Duration;

pub const REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const API_URL_ENV: &str = "GITHUB_API_URL";

/// Settings shared by every command of a single invocation.
///
/// Built once from parsed arguments and passed by reference into commands.
#[derive(Clone)]
pub struct Config {
    pub repository: RepoSlug,
    pub token: String,
    pub api_url: String,
    pub timeout: Duration,
    pub concurrency: NonZeroUsize,
}

impl Config {
    /// Validate the required inputs. Empty values count as missing.
    pub fn new(repository: Option<&str>, token: Option<&str>) -> Result<Self> {
        let repository = repository
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| {
                Error::validation(format!(
                    "missing repository - provide one with flag --repository or environment variable {REPOSITORY_ENV}"
                ))
            })?;
        let repository = RepoSlug::new(repository)
            .map_err(|e| Error::validation(format!("invalid repository '{repository}': {e}")))?;

        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                Error::validation(format!(
                    "missing GitHub access token - provide one with flag --token or environment variable {TOKEN_ENV}"
                ))
            })?;

        Ok(Self {
            repository,
            token: token.to_string(),
            api_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
        })
    }

    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn concurrency(mut self, concurrency: NonZeroUsize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Build an API client using the default media type.
    pub fn client(&self) -> Result<ApiClient> {
        Ok(ApiClient::new(&self.api_url, &self.token, self.timeout)?)
    }

    pub fn fan_out(&self) -> FanOut {
        FanOut::new(self.concurrency)
    }

    /// Base path of the deployments resource for the configured repository.
    pub fn deployments_path(&self) -> String {
        format!("/repos/{}/deployments", self.repository)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("repository", &self.repository)
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}
