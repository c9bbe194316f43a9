//! Terminal rendering of search, detail and catalogue state

use foi_search::models::{RequestSummary, YearTotals};
use foi_search::search::{
    sync_request_id, CatalogueSection, DetailState, DetailView, SearchController,
};
use serde::Serialize;
use std::fmt::Write;

/// JSON shape of the result list printed with `--json`
#[derive(Serialize)]
pub struct SearchView<'a> {
    pub query: String,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub total_results: Option<u64>,
    pub results: &'a [RequestSummary],
    pub error: Option<&'a str>,
}

impl<'a> SearchView<'a> {
    pub fn of(search: &'a SearchController) -> Self {
        let pagination = search.pagination();
        Self {
            query: search.current_query(),
            page: pagination.page(),
            limit: pagination.limit().get(),
            total_pages: pagination.total_pages(),
            total_results: search.total_results(),
            results: search.results(),
            error: search.error(),
        }
    }
}

pub fn render_results(search: &SearchController, compact: bool) -> String {
    let mut out = String::new();

    if let Some(error) = search.error() {
        let _ = writeln!(out, "! {}", error);
    }

    match search.result_summary() {
        Some(summary) => {
            let _ = writeln!(out, "{}", summary);
        }
        None if search.filter().is_blank() => {
            let _ = writeln!(out, "No results");
        }
        None => {
            let _ = writeln!(out, "No results match the current filters");
        }
    }

    for request in search.results() {
        if compact {
            let _ = writeln!(
                out,
                "  [{}] {} ({})",
                request.id,
                request.title,
                request.published_on()
            );
        } else {
            let _ = writeln!(out);
            let _ = writeln!(out, "  [{}] {}", request.id, request.title);
            let _ = writeln!(
                out,
                "      Authored by {} \u{2022} Produced by {}",
                request.author, request.producer
            );
            let _ = writeln!(out, "      Published on {}", request.published_on());
        }
    }

    let pagination = search.pagination();
    if pagination.controls_visible() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", pagination.summary());
        if let Some(error) = search.jump_error() {
            let _ = writeln!(out, "! {}", error);
        }
    }
    let _ = writeln!(out, "Items per page: {}", pagination.limit());

    out
}

pub fn render_detail(view: &DetailView) -> String {
    let mut out = String::new();

    match view.state() {
        DetailState::Loading => {
            let _ = writeln!(out, "Loading...");
        }
        DetailState::Error(message) => {
            let _ = writeln!(out, "! {}", message);
        }
        DetailState::Loaded(detail) => {
            let _ = writeln!(out, "{}", detail.title);
            let _ = writeln!(
                out,
                "Authored by {} \u{2022} Produced by {}",
                detail.author, detail.producer
            );
            let _ = writeln!(out, "Published on {}", detail.published_on());
            let _ = writeln!(out);
            let _ = writeln!(out, "Request");
            let _ = writeln!(out, "{}", detail.request_html());
            let _ = writeln!(out);
            let _ = writeln!(out, "Response");
            let _ = writeln!(out, "{}", detail.response_html());
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Request ID: {} \u{2022} View on gov.je: {}",
                detail.id,
                detail.gov_je_url()
            );
            let _ = writeln!(
                out,
                "Share: ?{}",
                sync_request_id("", Some(&detail.id))
            );
        }
    }

    out
}

pub fn render_list(section: &CatalogueSection<Vec<String>>) -> String {
    let mut out = String::new();
    if let Some(error) = &section.error {
        let _ = writeln!(out, "! {}", error);
    }
    for item in &section.items {
        let _ = writeln!(out, "{}", item);
    }
    out
}

pub fn render_years(section: &CatalogueSection<YearTotals>) -> String {
    let mut out = String::new();
    if let Some(error) = &section.error {
        let _ = writeln!(out, "! {}", error);
    }
    for (year, count) in &section.items {
        let _ = writeln!(out, "{} ({})", year, count);
    }
    out
}
