//! `?id=` handling for links that open a request directly.

use url::form_urlencoded;

use crate::models::RequestId;

const ID_PARAM: &str = "id";

/// What the page should do with the query string it was opened with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepLink {
    /// No `id` parameter
    None,
    /// Numeric `id`: open the detail view for it
    Open(RequestId),
    /// Non-numeric `id`: drop it and replace the query with this one
    Strip(String),
}

/// Inspect the page's query string (with or without leading `?`)
pub fn initial_request_id(query: &str) -> DeepLink {
    let query = query.trim_start_matches('?');
    let id = form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| *name == ID_PARAM)
        .map(|(_, value)| value.into_owned());

    match id {
        None => DeepLink::None,
        Some(value) if value.is_empty() => DeepLink::None,
        Some(value) => {
            let id = RequestId::new(value);
            if id.is_numeric() {
                DeepLink::Open(id)
            } else {
                DeepLink::Strip(sync_request_id(query, None))
            }
        }
    }
}

/// Request named by user input: a bare numeric id, a query string such as
/// `?id=5120`, or a full page link carrying one. Anything that does not
/// resolve to a numeric id is rejected.
pub fn parse_request_ref(input: &str) -> Option<RequestId> {
    let input = input.trim();
    let query = match input.split_once('?') {
        Some((_, query)) => query,
        None if input.contains('=') => input,
        None => {
            let id = RequestId::new(input);
            return id.is_numeric().then_some(id);
        }
    };

    match initial_request_id(query.split('#').next().unwrap_or_default()) {
        DeepLink::Open(id) => Some(id),
        DeepLink::None | DeepLink::Strip(_) => None,
    }
}

/// Query string with `id` set to the open request, or removed when none is
/// open. Other parameters keep their order.
pub fn sync_request_id(query: &str, open: Option<&RequestId>) -> String {
    let query = query.trim_start_matches('?');
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut written = false;

    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        if name == ID_PARAM {
            if let (Some(id), false) = (open, written) {
                serializer.append_pair(ID_PARAM, id.as_str());
                written = true;
            }
            continue;
        }
        serializer.append_pair(&name, &value);
    }

    if let (Some(id), false) = (open, written) {
        serializer.append_pair(ID_PARAM, id.as_str());
    }
    serializer.finish()
}
