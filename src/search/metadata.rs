//! Option lists for the author, producer and year filters.
//!
//! Each list loads independently: one failing leaves the others (and the
//! search itself) usable and carries its own error message.

use serde::Serialize;
use tracing::warn;

use crate::client::{ApiError, ApiResult, FoiApi};
use crate::models::YearTotals;

pub const AUTHORS_FAILED: &str = "Failed to load authors";
pub const PRODUCERS_FAILED: &str = "Failed to load producers";
pub const YEAR_TOTALS_FAILED: &str = "Failed to load totals per year";

/// One loaded list and the error that replaced it, if any
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogueSection<T> {
    pub items: T,
    pub error: Option<String>,

    /// API error behind `error`
    #[serde(skip)]
    pub failure: Option<ApiError>,
}

impl<T: Default> CatalogueSection<T> {
    fn from_outcome(section: &str, outcome: ApiResult<T>, fallback: &str) -> Self {
        match outcome {
            Ok(items) => Self {
                items,
                error: None,
                failure: None,
            },
            Err(e) => {
                warn!(section = section, error = %e, "Failed to load filter options");
                Self {
                    items: T::default(),
                    error: Some(e.user_message(fallback)),
                    failure: Some(e),
                }
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything the filter form offers for selection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterCatalogue {
    pub authors: CatalogueSection<Vec<String>>,
    pub producers: CatalogueSection<Vec<String>>,
    pub year_totals: CatalogueSection<YearTotals>,
}

impl FilterCatalogue {
    /// Fetch the three lists concurrently
    pub async fn load(api: &dyn FoiApi) -> Self {
        let (authors, producers, year_totals) = tokio::join!(
            load_authors(api),
            load_producers(api),
            load_year_totals(api)
        );

        Self {
            authors,
            producers,
            year_totals,
        }
    }

    /// Error messages of the sections that failed, in form order
    pub fn errors(&self) -> Vec<&str> {
        [
            self.authors.error.as_deref(),
            self.producers.error.as_deref(),
            self.year_totals.error.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

pub async fn load_authors(api: &dyn FoiApi) -> CatalogueSection<Vec<String>> {
    CatalogueSection::from_outcome("authors", api.authors().await, AUTHORS_FAILED)
}

pub async fn load_producers(api: &dyn FoiApi) -> CatalogueSection<Vec<String>> {
    CatalogueSection::from_outcome("producers", api.producers().await, PRODUCERS_FAILED)
}

pub async fn load_year_totals(api: &dyn FoiApi) -> CatalogueSection<YearTotals> {
    CatalogueSection::from_outcome("year_totals", api.year_totals().await, YEAR_TOTALS_FAILED)
}
