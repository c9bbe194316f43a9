use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::markup::TrustedHtml;

/// Long English date, e.g. `Tuesday 5 March 2024`
const LONG_DATE_FORMAT: &str = "%A %-d %B %Y";

/// Identifier of a FOI request. The API sends ids as JSON numbers, older
/// payloads as strings; both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the id is a non-empty run of ASCII digits
    pub fn is_numeric(&self) -> bool {
        !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for RequestId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for RequestId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => RequestId(n.to_string()),
            RawId::Text(s) => RequestId(s),
        })
    }
}

/// One row of a search result page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSummary {
    pub id: RequestId,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub producer: String,

    #[serde(default)]
    pub publish_date: String,
}

impl RequestSummary {
    /// Publish date as shown next to the result
    pub fn published_on(&self) -> String {
        format_publish_date(&self.publish_date)
    }
}

/// Full request as returned by `/v1/foi-requests/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDetail {
    pub id: RequestId,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub producer: String,

    #[serde(default)]
    pub publish_date: String,

    /// HTML body of the original request
    #[serde(default)]
    pub request_text: Option<String>,

    /// HTML body of the published response
    #[serde(default)]
    pub response_text: Option<String>,
}

impl RequestDetail {
    pub fn published_on(&self) -> String {
        format_publish_date(&self.publish_date)
    }

    /// Request markup, passed through untouched
    pub fn request_html(&self) -> TrustedHtml {
        TrustedHtml::from_server(self.request_text.clone().unwrap_or_default())
    }

    /// Response markup with site-relative links pointing at gov.je
    pub fn response_html(&self) -> TrustedHtml {
        TrustedHtml::from_server(self.response_text.clone().unwrap_or_default())
            .with_absolute_gov_je_links()
    }

    /// Link to the request on the gov.je FOI disclosure log
    pub fn gov_je_url(&self) -> String {
        gov_je_url(&self.id)
    }
}

/// Link to a request on the gov.je FOI disclosure log
pub fn gov_je_url(id: &RequestId) -> String {
    format!(
        "https://www.gov.je/government/freedomofinformation/pages/foi.aspx?ReportID={}",
        id
    )
}

/// `pagination` block of a search response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    #[serde(default)]
    pub total_items: Option<u64>,

    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// Body of `GET /v1/foi-requests`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<RequestSummary>,

    #[serde(default)]
    pub pagination: PaginationInfo,
}

/// Published request count per year, keyed by the year as sent by the API
pub type YearTotals = BTreeMap<String, u64>;

/// `{ "results": [...] }` envelope used by the catalogue endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Body of `GET /v1/foi-requests/stats`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub results: Option<Stats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default)]
    pub totals_per_year: YearTotals,
}

impl StatsResponse {
    pub fn into_year_totals(self) -> YearTotals {
        self.results.map(|s| s.totals_per_year).unwrap_or_default()
    }
}

/// Body of `GET /v1/foi-requests/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct DetailResponse {
    pub results: RequestDetail,
}

/// Error body; every field optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Render an API publish date as a long English date. Values that are not
/// RFC 3339 timestamps or plain dates are returned as sent.
pub fn format_publish_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(LONG_DATE_FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(LONG_DATE_FORMAT).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format(LONG_DATE_FORMAT).to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_accepts_number_and_string() {
        let from_number: RequestId = serde_json::from_str("4512").unwrap();
        let from_string: RequestId = serde_json::from_str("\"4512\"").unwrap();
        assert_eq!(from_number, from_string);
        assert!(from_number.is_numeric());
        assert!(!RequestId::new("45a").is_numeric());
        assert!(!RequestId::new("").is_numeric());
    }

    #[test]
    fn test_search_response_deserialization() {
        let body = r#"{
            "results": [
                {"id": 1, "title": "Road gritting", "author": "Infrastructure",
                 "producer": "Highways", "publishDate": "2024-03-05T00:00:00.000Z"}
            ],
            "pagination": {"totalItems": 41, "totalPages": 9}
        }"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].id.as_str(), "1");
        assert_eq!(response.pagination.total_items, Some(41));
        assert_eq!(response.pagination.total_pages, Some(9));
    }

    #[test]
    fn test_search_response_without_pagination() {
        let response: SearchResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(response.results.is_empty());
        assert_eq!(response.pagination.total_pages, None);
    }

    #[test]
    fn test_publish_date_formatting() {
        assert_eq!(
            format_publish_date("2024-03-05T00:00:00.000Z"),
            "Tuesday 5 March 2024"
        );
        assert_eq!(format_publish_date("2023-12-31"), "Sunday 31 December 2023");
        assert_eq!(format_publish_date("last week"), "last week");
    }

    #[test]
    fn test_stats_totals_per_year() {
        let body = r#"{"results": {"totalsPerYear": {"2023": 812, "2024": 640}}}"#;
        let stats: StatsResponse = serde_json::from_str(body).unwrap();
        let totals = stats.into_year_totals();
        assert_eq!(totals.get("2023"), Some(&812));
        assert_eq!(totals.keys().collect::<Vec<_>>(), vec!["2023", "2024"]);
    }

    #[test]
    fn test_gov_je_url() {
        assert_eq!(
            gov_je_url(&RequestId::from(77)),
            "https://www.gov.je/government/freedomofinformation/pages/foi.aspx?ReportID=77"
        );
    }
}
