// ABOUTME: Authenticated HTTP client for the GitHub REST API.
// ABOUTME: Builds URLs, attaches auth and media-type headers, and decodes JSON.

use super::error::ClientError;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;

/// Public GitHub API root.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com/";

/// Media type selecting the v3 REST API.
pub const DEFAULT_ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Preview media type required to post `inactive` statuses.
pub const PREVIEW_ACCEPT_HEADER: &str = "application/vnd.github.ant-man-preview+json";

/// Client-wide timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Query parameters. Keys are unique and iterate in sorted order.
pub type Query = BTreeMap<String, String>;

/// HTTP client for the GitHub deployments API.
///
/// One instance is built per command invocation and shared by reference
/// across concurrent requests. The accept header may be swapped before
/// requests are issued, but never while a batch is in flight.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
    accept: String,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            http,
            base_url,
            token: token.into(),
            accept: DEFAULT_ACCEPT_HEADER.to_string(),
        })
    }

    pub fn accept_header(&self) -> &str {
        &self.accept
    }

    pub fn set_accept_header(&mut self, accept: impl Into<String>) {
        self.accept = accept.into();
    }

    /// Builder-style variant of [`ApiClient::set_accept_header`].
    pub fn with_accept_header(mut self, accept: impl Into<String>) -> Self {
        self.set_accept_header(accept);
        self
    }

    /// Resolve `path` against the base URL.
    ///
    /// The path replaces the base path entirely. Query parameters are
    /// percent-encoded and emitted in key order so the URL is deterministic.
    pub fn url(&self, path: &str, query: &Query) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);

        if query.is_empty() {
            url.set_query(None);
        } else {
            let encoded = query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.set_query(Some(&encoded));
        }

        url
    }

    /// GET `path` and decode a 200 response body into `T`.
    pub async fn get<T>(&self, path: &str, query: &Query) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path, query);
        tracing::debug!("GET {}", url);

        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        tracing::debug!("GET {} returned {}", path, status);

        let body = response.bytes().await.map_err(ClientError::Transport)?;
        if status.as_u16() != 200 {
            return Err(ClientError::api(
                status.as_u16(),
                String::from_utf8_lossy(&body),
            ));
        }

        serde_json::from_slice(&body).map_err(ClientError::Decode)
    }

    /// POST `body` as JSON to `path`. Any status from 200 to 204 is success.
    ///
    /// The body is encoded before anything is sent, so an encoding failure
    /// never reaches the network.
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path, &Query::new());
        let payload = serde_json::to_vec(body).map_err(ClientError::Encode)?;
        tracing::debug!("POST {} ({} bytes)", url, payload.len());

        let response = self
            .request(Method::POST, url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status().as_u16();
        tracing::debug!("POST {} returned {}", path, status);

        if !(200..=204).contains(&status) {
            let text = response.text().await.map_err(ClientError::Transport)?;
            return Err(ClientError::api(status, text));
        }
        Ok(())
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, &self.accept)
    }
}
