//! Result and pagination controller for the FOI search page.
//!
//! The controller owns the filter, pagination and result state. Page and
//! page-size setters re-run the search themselves; editing the filter does
//! not. Every request goes out under a [`SearchTicket`] and only a response
//! newer than the last one applied may change the state, so out-of-order
//! completions cannot overwrite fresher results.

use std::sync::Arc;
use tracing::{debug, warn};

use super::error::PageError;
use super::filter::FilterState;
use super::pagination::{parse_jump_target, validate_jump_input, PageSize, PaginationState};
use super::query::build_query;
use crate::client::{ApiError, ApiResult, FoiApi};
use crate::models::{RequestSummary, SearchResponse};

pub const SEARCH_FAILED: &str = "Failed to search FOI requests";

/// Handle for one issued search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    id: u64,
    query: String,
}

impl SearchTicket {
    /// Position in issue order; later requests have larger ids
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Query string the request was issued with
    pub fn query(&self) -> &str {
        &self.query
    }
}

pub struct SearchController {
    api: Arc<dyn FoiApi>,
    filter: FilterState,
    pagination: PaginationState,
    results: Vec<RequestSummary>,
    total_results: Option<u64>,
    error: Option<String>,
    failure: Option<ApiError>,
    jump_input: String,
    jump_error: Option<String>,
    last_issued: u64,
    last_applied: u64,
    in_flight: usize,
}

impl SearchController {
    pub fn new(api: Arc<dyn FoiApi>) -> Self {
        Self::with_limit(api, PageSize::default())
    }

    pub fn with_limit(api: Arc<dyn FoiApi>, limit: PageSize) -> Self {
        Self {
            api,
            filter: FilterState::default(),
            pagination: PaginationState::new(limit),
            results: Vec::new(),
            total_results: None,
            error: None,
            failure: None,
            jump_input: String::new(),
            jump_error: None,
            last_issued: 0,
            last_applied: 0,
            in_flight: 0,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Edit the filter. Takes effect on the next search.
    pub fn filter_mut(&mut self) -> &mut FilterState {
        &mut self.filter
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn results(&self) -> &[RequestSummary] {
        &self.results
    }

    pub fn total_results(&self) -> Option<u64> {
        self.total_results
    }

    /// Message of the last failed search, cleared when a new search starts
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// API error behind [`error`](Self::error)
    pub fn failure(&self) -> Option<&ApiError> {
        self.failure.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn jump_input(&self) -> &str {
        &self.jump_input
    }

    pub fn jump_error(&self) -> Option<&str> {
        self.jump_error.as_deref()
    }

    /// "Showing N of M results", only when there is something to show
    pub fn result_summary(&self) -> Option<String> {
        if self.results.is_empty() {
            return None;
        }
        let total = self
            .total_results
            .map(|t| t.to_string())
            .unwrap_or_else(|| "?".to_string());
        Some(format!("Showing {} of {} results", self.results.len(), total))
    }

    /// Query string for the current state
    pub fn current_query(&self) -> String {
        build_query(&self.filter, &self.pagination)
    }

    /// Start a search: clears the error, marks the controller as loading and
    /// returns the ticket the response must be completed with.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.last_issued += 1;
        self.in_flight += 1;
        self.error = None;
        self.failure = None;

        let ticket = SearchTicket {
            id: self.last_issued,
            query: self.current_query(),
        };
        debug!(ticket = ticket.id, query = %ticket.query, "Search issued");
        ticket
    }

    /// Apply the outcome of a search. Returns `false` when a newer response
    /// has already been applied and this one was discarded.
    ///
    /// Success replaces results, total and page count wholesale. Failure sets
    /// the error message and keeps the previous results.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        outcome: ApiResult<SearchResponse>,
    ) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        if ticket.id <= self.last_applied {
            warn!(
                ticket = ticket.id,
                last_applied = self.last_applied,
                "Discarding stale search response"
            );
            return false;
        }
        self.last_applied = ticket.id;

        match outcome {
            Ok(response) => {
                debug!(
                    ticket = ticket.id,
                    results = response.results.len(),
                    total_pages = ?response.pagination.total_pages,
                    "Search applied"
                );
                self.results = response.results;
                self.total_results = response.pagination.total_items;
                self.pagination
                    .apply_total_pages(response.pagination.total_pages);
            }
            Err(e) => {
                warn!(ticket = ticket.id, error = %e, "Search failed");
                self.error = Some(e.user_message(SEARCH_FAILED));
                self.failure = Some(e);
            }
        }
        true
    }

    /// Issue one request with the current query and apply its outcome
    pub async fn search(&mut self) {
        let ticket = self.begin_search();
        let api = Arc::clone(&self.api);
        let outcome = api.search(ticket.query()).await;
        self.complete_search(ticket, outcome);
    }

    /// Go to `page` and search. Rejected pages leave the state untouched and
    /// issue no request.
    pub async fn set_page(&mut self, page: u32) -> Result<(), PageError> {
        self.pagination.set_page(page)?;
        self.search().await;
        Ok(())
    }

    /// Step forward one page. Fails without a request on the last page.
    pub async fn next_page(&mut self) -> Result<(), PageError> {
        let page = self.pagination.next_page().ok_or(PageError::OutOfRange {
            page: self.pagination.page().saturating_add(1),
            total_pages: self.pagination.total_pages(),
        })?;
        self.set_page(page).await
    }

    /// Step back one page, or onto the last page when the current one lies
    /// past it. Fails without a request on the first page.
    pub async fn previous_page(&mut self) -> Result<(), PageError> {
        let page = self.pagination.previous_page().ok_or(PageError::OutOfRange {
            page: 0,
            total_pages: self.pagination.total_pages(),
        })?;
        self.set_page(page).await
    }

    /// Change the page size and search
    pub async fn set_limit(&mut self, limit: u32) -> Result<(), PageError> {
        let limit = PageSize::new(limit)?;
        self.pagination.set_limit(limit);
        self.search().await;
        Ok(())
    }

    /// Edit the jump-to-page box, validating as the user types
    pub fn set_jump_input(&mut self, input: impl Into<String>) {
        self.jump_input = input.into();
        self.jump_error = validate_jump_input(&self.jump_input)
            .err()
            .map(|e| e.to_string());
    }

    /// Commit a jump-to-page input. On success the page changes, the box is
    /// cleared and a search runs. An empty input does nothing.
    pub async fn jump_to_page(&mut self, input: &str) -> Result<(), PageError> {
        self.jump_input = input.to_string();
        if input.is_empty() {
            self.jump_error = None;
            return Ok(());
        }

        let page = match parse_jump_target(input, self.pagination.total_pages()) {
            Ok(page) => page,
            Err(e) => {
                self.jump_error = Some(e.to_string());
                return Err(e);
            }
        };

        self.pagination.set_page(page)?;
        self.jump_input.clear();
        self.jump_error = None;
        self.search().await;
        Ok(())
    }
}
