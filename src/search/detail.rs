//! Single-request detail view.
//!
//! `open` always puts the view back into `Loading`; `load` settles it into
//! `Loaded` or `Error`, which stay put until the next `open`.

use std::sync::Arc;
use strum::{Display, EnumString};
use tracing::{debug, warn};

use crate::client::{ApiError, ApiResult, FoiApi};
use crate::models::{RequestDetail, RequestId};

pub const DETAIL_FAILED: &str = "Failed to load FOI request";

/// Detail fetch state
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Box<RequestDetail>),
    Error(String),
}

impl DetailState {
    pub fn phase(&self) -> DetailPhase {
        match self {
            DetailState::Loading => DetailPhase::Loading,
            DetailState::Loaded(_) => DetailPhase::Loaded,
            DetailState::Error(_) => DetailPhase::Error,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, DetailState::Loading)
    }
}

/// Name of a [`DetailState`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DetailPhase {
    Loading,
    Loaded,
    Error,
}

pub struct DetailView {
    api: Arc<dyn FoiApi>,
    request_id: Option<RequestId>,
    state: DetailState,
    failure: Option<ApiError>,
}

impl DetailView {
    pub fn new(api: Arc<dyn FoiApi>) -> Self {
        Self {
            api,
            request_id: None,
            state: DetailState::Loading,
            failure: None,
        }
    }

    /// Open the view for `id`, resetting to `Loading`
    pub fn open(&mut self, id: RequestId) {
        debug!(request_id = %id, "Opening request detail");
        self.request_id = Some(id);
        self.state = DetailState::Loading;
        self.failure = None;
    }

    pub fn close(&mut self) {
        self.request_id = None;
        self.state = DetailState::Loading;
        self.failure = None;
    }

    pub fn is_open(&self) -> bool {
        self.request_id.is_some()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn detail(&self) -> Option<&RequestDetail> {
        match &self.state {
            DetailState::Loaded(detail) => Some(&**detail),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            DetailState::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// API error behind [`error`](Self::error)
    pub fn failure(&self) -> Option<&ApiError> {
        self.failure.as_ref()
    }

    /// Heading text; empty while loading
    pub fn title(&self) -> &str {
        self.detail().map(|d| d.title.as_str()).unwrap_or("")
    }

    /// Fetch the open request. Does nothing when the view is closed.
    pub async fn load(&mut self) {
        let Some(id) = self.request_id.clone() else {
            return;
        };
        self.state = DetailState::Loading;
        self.failure = None;

        let api = Arc::clone(&self.api);
        let outcome = api.request(&id).await;
        self.complete(&id, outcome);
    }

    /// `open` followed by `load`
    pub async fn open_and_load(&mut self, id: RequestId) {
        self.open(id);
        self.load().await;
    }

    /// Apply a fetch outcome for `id`. Outcomes for a request that is no
    /// longer open are discarded; returns whether the state changed.
    pub fn complete(&mut self, id: &RequestId, outcome: ApiResult<RequestDetail>) -> bool {
        if self.request_id.as_ref() != Some(id) {
            debug!(request_id = %id, "Discarding detail for a request that is no longer open");
            return false;
        }

        self.state = match outcome {
            Ok(detail) => DetailState::Loaded(Box::new(detail)),
            Err(e) => {
                warn!(request_id = %id, error = %e, "Failed to load request detail");
                let message = e.user_message(DETAIL_FAILED);
                self.failure = Some(e);
                DetailState::Error(message)
            }
        };
        true
    }
}
