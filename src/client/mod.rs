// ABOUTME: GitHub REST API client and its error taxonomy.
// ABOUTME: Re-exports the HTTP client, media-type constants, and ClientError.

mod error;
mod http;

pub use error::ClientError;
pub use http::{
    ApiClient, DEFAULT_ACCEPT_HEADER, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, PREVIEW_ACCEPT_HEADER,
    Query,
};
