use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::{ApiError, ApiResult, FoiApi};
use crate::config::ApiConfig;
use crate::error::{FoiError, Result};
use crate::models::{
    ApiErrorBody, DetailResponse, ListResponse, RequestDetail, RequestId, SearchResponse,
    StatsResponse, YearTotals,
};

const FOI_REQUESTS_PATH: &str = "/v1/foi-requests";

/// reqwest-backed client for the FOI request endpoints
#[derive(Clone)]
pub struct HttpFoiClient {
    client: Client,
    base_url: String,
}

impl HttpFoiClient {
    /// Create a new client from API configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FoiError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a search with the given query string
    pub fn search_url(&self, query: &str) -> String {
        if query.is_empty() {
            format!("{}{}", self.base_url, FOI_REQUESTS_PATH)
        } else {
            format!("{}{}?{}", self.base_url, FOI_REQUESTS_PATH, query)
        }
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!("{}{}/{}", self.base_url, FOI_REQUESTS_PATH, suffix)
    }

    /// URL of a single request. The id is percent-encoded as one path
    /// segment, so `?` or `/` in it cannot reach another endpoint.
    pub fn request_url(&self, id: &RequestId) -> ApiResult<String> {
        if id.as_str().is_empty() {
            return Err(ApiError::InvalidRequest("empty request id".to_string()));
        }

        let mut url = Url::parse(&format!("{}{}", self.base_url, FOI_REQUESTS_PATH))
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidRequest("base URL cannot take a path".to_string()))?
            .push(id.as_str());

        Ok(url.into())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!(url = %url, "Issuing API request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);

            warn!(
                url = %url,
                status = status.as_u16(),
                message = message.as_deref().unwrap_or(""),
                "API request failed"
            );

            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(url = %url, error = %e, "Unexpected response body");
            ApiError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl FoiApi for HttpFoiClient {
    async fn search(&self, query: &str) -> ApiResult<SearchResponse> {
        self.get_json(&self.search_url(query)).await
    }

    async fn authors(&self) -> ApiResult<Vec<String>> {
        let body: ListResponse<String> = self.get_json(&self.endpoint("authors")).await?;
        Ok(body.results)
    }

    async fn producers(&self) -> ApiResult<Vec<String>> {
        let body: ListResponse<String> = self.get_json(&self.endpoint("producers")).await?;
        Ok(body.results)
    }

    async fn year_totals(&self) -> ApiResult<YearTotals> {
        let body: StatsResponse = self.get_json(&self.endpoint("stats")).await?;
        Ok(body.into_year_totals())
    }

    async fn request(&self, id: &RequestId) -> ApiResult<RequestDetail> {
        let body: DetailResponse = self.get_json(&self.request_url(id)?).await?;
        Ok(body.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> HttpFoiClient {
        HttpFoiClient::new(&ApiConfig {
            url: url.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = client("https://api.opendata.je/");
        assert_eq!(client.base_url(), "https://api.opendata.je");
    }

    #[test]
    fn test_search_url() {
        let client = client("https://api.opendata.je");
        assert_eq!(
            client.search_url("limit=5&page=1"),
            "https://api.opendata.je/v1/foi-requests?limit=5&page=1"
        );
        assert_eq!(
            client.search_url(""),
            "https://api.opendata.je/v1/foi-requests"
        );
    }

    #[test]
    fn test_request_url_encodes_id() {
        let client = client("https://api.opendata.je");
        assert_eq!(
            client.request_url(&RequestId::from(5120)).unwrap(),
            "https://api.opendata.je/v1/foi-requests/5120"
        );
        assert_eq!(
            client.request_url(&RequestId::new("5?limit=1")).unwrap(),
            "https://api.opendata.je/v1/foi-requests/5%3Flimit=1"
        );
        assert_eq!(
            client.request_url(&RequestId::new("../stats")).unwrap(),
            "https://api.opendata.je/v1/foi-requests/..%2Fstats"
        );
    }

    #[test]
    fn test_request_url_rejects_empty_id() {
        let client = client("https://api.opendata.je");
        assert!(matches!(
            client.request_url(&RequestId::new("")),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_endpoint_paths() {
        let client = client("https://api.opendata.je");
        assert_eq!(
            client.endpoint("stats"),
            "https://api.opendata.je/v1/foi-requests/stats"
        );
    }
}
