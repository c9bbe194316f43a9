//! Transport layer for the FOI request endpoints of the open data API.
//!
//! [`FoiApi`] is the seam the search controller, detail view and metadata
//! loader talk to. [`HttpFoiClient`] is the reqwest-backed implementation;
//! tests substitute their own.

mod http;

pub use http::HttpFoiClient;

use crate::models::{RequestDetail, RequestId, SearchResponse, YearTotals};
use async_trait::async_trait;

/// Result type for API calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors that can occur while calling the API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Request never produced a response (connection refused, DNS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("Request failed with status {status}")]
    Status {
        status: u16,
        /// `message` field of the error body, when the body carried one
        message: Option<String>,
    },

    /// Response body was not the expected JSON shape
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Request could not be built; nothing was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Message to show the user: the server's own message when it sent a
    /// non-empty one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Read-only operations against the FOI request endpoints
#[async_trait]
pub trait FoiApi: Send + Sync {
    /// `GET /v1/foi-requests?{query}`
    async fn search(&self, query: &str) -> ApiResult<SearchResponse>;

    /// `GET /v1/foi-requests/authors`
    async fn authors(&self) -> ApiResult<Vec<String>>;

    /// `GET /v1/foi-requests/producers`
    async fn producers(&self) -> ApiResult<Vec<String>>;

    /// `GET /v1/foi-requests/stats`, reduced to the per-year totals
    async fn year_totals(&self) -> ApiResult<YearTotals>;

    /// `GET /v1/foi-requests/{id}`
    async fn request(&self, id: &RequestId) -> ApiResult<RequestDetail>;
}
