//! Common test utilities for the FOI search tests
//!
//! `ScriptedApi` answers each endpoint from a queue of canned outcomes and
//! records every search query it receives.

#![allow(dead_code)]

use async_trait::async_trait;
use foi_search::client::{ApiError, ApiResult, FoiApi};
use foi_search::models::{
    PaginationInfo, RequestDetail, RequestId, RequestSummary, SearchResponse, YearTotals,
};
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Default)]
pub struct ScriptedApi {
    searches: Mutex<VecDeque<ApiResult<SearchResponse>>>,
    queries: Mutex<Vec<String>>,
    authors: Mutex<Option<ApiResult<Vec<String>>>>,
    producers: Mutex<Option<ApiResult<Vec<String>>>>,
    year_totals: Mutex<Option<ApiResult<YearTotals>>>,
    details: Mutex<VecDeque<ApiResult<RequestDetail>>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome of the next search call
    pub fn push_search(&self, outcome: ApiResult<SearchResponse>) -> &Self {
        self.searches.lock().unwrap().push_back(outcome);
        self
    }

    pub fn push_detail(&self, outcome: ApiResult<RequestDetail>) -> &Self {
        self.details.lock().unwrap().push_back(outcome);
        self
    }

    pub fn set_authors(&self, outcome: ApiResult<Vec<String>>) {
        *self.authors.lock().unwrap() = Some(outcome);
    }

    pub fn set_producers(&self, outcome: ApiResult<Vec<String>>) {
        *self.producers.lock().unwrap() = Some(outcome);
    }

    pub fn set_year_totals(&self, outcome: ApiResult<YearTotals>) {
        *self.year_totals.lock().unwrap() = Some(outcome);
    }

    /// Search queries received so far, in call order
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn search_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl FoiApi for ScriptedApi {
    async fn search(&self, query: &str) -> ApiResult<SearchResponse> {
        self.queries.lock().unwrap().push(query.to_string());
        self.searches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted search".to_string())))
    }

    async fn authors(&self) -> ApiResult<Vec<String>> {
        self.authors.lock().unwrap().clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn producers(&self) -> ApiResult<Vec<String>> {
        self.producers.lock().unwrap().clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn year_totals(&self) -> ApiResult<YearTotals> {
        self.year_totals
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(YearTotals::new()))
    }

    async fn request(&self, _id: &RequestId) -> ApiResult<RequestDetail> {
        self.details
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted detail".to_string())))
    }
}

/// Helper to create a test result row
pub fn summary(id: u64, title: &str) -> RequestSummary {
    RequestSummary {
        id: RequestId::from(id),
        title: title.to_string(),
        author: "Chief Minister's Department".to_string(),
        producer: "Statistics Jersey".to_string(),
        publish_date: "2024-02-01T00:00:00.000Z".to_string(),
    }
}

/// Helper to create a search response page
pub fn page(ids: &[u64], total_items: u64, total_pages: u32) -> SearchResponse {
    SearchResponse {
        results: ids
            .iter()
            .map(|id| summary(*id, &format!("Request {}", id)))
            .collect(),
        pagination: PaginationInfo {
            total_items: Some(total_items),
            total_pages: Some(total_pages),
        },
    }
}

/// Helper to create a test request detail
pub fn detail(id: u64) -> RequestDetail {
    RequestDetail {
        id: RequestId::from(id),
        title: format!("Request {}", id),
        author: "Health and Community Services".to_string(),
        producer: "HCS".to_string(),
        publish_date: "2023-11-20T00:00:00.000Z".to_string(),
        request_text: Some("<p>Please provide waiting list figures.</p>".to_string()),
        response_text: Some(
            r#"<p>See <a href="/health/waiting-lists">waiting lists</a>.</p>"#.to_string(),
        ),
    }
}

pub fn server_error(message: &str) -> ApiError {
    ApiError::Status {
        status: 500,
        message: Some(message.to_string()),
    }
}
