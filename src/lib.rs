//! Client library for searching Freedom of Information requests published
//! through the open data API.
//!
//! The crate models the FOI search page as plain state driven by explicit
//! calls: a filter form, a paged result list with previous/next/jump
//! controls, a detail view for a single request, and the option lists that
//! feed the filter form. All data comes from the API; nothing is cached.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod search;

pub use client::{ApiError, FoiApi, HttpFoiClient};
pub use config::Config;
pub use error::{FoiError, Result};
pub use search::{DetailView, FilterCatalogue, FilterState, SearchController};
