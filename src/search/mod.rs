//! FOI request search.
//!
//! - [`FilterState`]: criteria the user edits; never triggers a request
//! - [`QueryBuilder`]: filter + pagination -> query string
//! - [`SearchController`]: runs searches, owns results and pagination, and
//!   re-searches when the page or page size changes
//! - [`DetailView`]: loading/loaded/error state of a single request
//! - [`FilterCatalogue`]: author, producer and year option lists
//!
//! # Example
//!
//! ```no_run
//! use foi_search::client::HttpFoiClient;
//! use foi_search::config::ApiConfig;
//! use foi_search::search::SearchController;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = Arc::new(HttpFoiClient::new(&ApiConfig::default())?);
//!     let mut search = SearchController::new(api);
//!
//!     search.filter_mut().title = Some("parking".to_string());
//!     search.filter_mut().select_year("2023");
//!     search.search().await;
//!
//!     if search.pagination().has_next() {
//!         search.next_page().await?;
//!     }
//!     println!("{}", search.pagination().summary());
//!
//!     Ok(())
//! }
//! ```

mod controller;
mod deep_link;
mod detail;
mod error;
mod filter;
mod metadata;
mod pagination;
mod query;

pub use controller::{SearchController, SearchTicket, SEARCH_FAILED};
pub use deep_link::{initial_request_id, parse_request_ref, sync_request_id, DeepLink};
pub use detail::{DetailPhase, DetailState, DetailView, DETAIL_FAILED};
pub use error::PageError;
pub use filter::FilterState;
pub use metadata::{
    load_authors, load_producers, load_year_totals, CatalogueSection, FilterCatalogue,
    AUTHORS_FAILED, PRODUCERS_FAILED, YEAR_TOTALS_FAILED,
};
pub use pagination::{
    parse_jump_target, validate_jump_input, PageSize, PaginationState, ALLOWED_PAGE_SIZES,
};
pub use query::{build_query, QueryBuilder};
