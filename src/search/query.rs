//! Query string building for `GET /v1/foi-requests`

use url::form_urlencoded;

use super::filter::{non_blank, FilterState};
use super::pagination::PaginationState;

/// Builds the search query string from the filter and pagination state.
///
/// Only non-blank filter fields are emitted; `limit` and `page` are always
/// present. Values go out verbatim apart from form encoding.
pub struct QueryBuilder<'a> {
    filter: &'a FilterState,
    pagination: &'a PaginationState,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(filter: &'a FilterState, pagination: &'a PaginationState) -> Self {
        Self { filter, pagination }
    }

    /// Parameters in the order they are sent
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let filter = self.filter;
        let mut pairs = vec![("limit", self.pagination.limit().to_string())];

        let optional = [
            ("title", &filter.title),
            ("startDate", &filter.start_date),
            ("endDate", &filter.end_date),
            ("author", &filter.author),
            ("producer", &filter.producer),
            ("requestText", &filter.request_text),
            ("responseText", &filter.response_text),
        ];

        for (name, value) in optional {
            if let Some(value) = non_blank(value) {
                pairs.push((name, value.to_string()));
            }
        }

        pairs.push(("page", self.pagination.page().to_string()));
        pairs
    }

    /// `application/x-www-form-urlencoded` query string, without leading `?`
    pub fn build(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in self.pairs() {
            serializer.append_pair(name, &value);
        }
        serializer.finish()
    }
}

/// Shorthand for `QueryBuilder::new(filter, pagination).build()`
pub fn build_query(filter: &FilterState, pagination: &PaginationState) -> String {
    QueryBuilder::new(filter, pagination).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::PageSize;

    #[test]
    fn test_blank_filter_yields_limit_and_page_only() {
        let pagination = PaginationState::default();

        assert_eq!(build_query(&FilterState::new(), &pagination), "limit=5&page=1");

        let whitespace = FilterState {
            title: Some("   ".to_string()),
            author: Some(String::new()),
            producer: Some("\t".to_string()),
            request_text: Some(" \n ".to_string()),
            response_text: None,
            start_date: Some(" ".to_string()),
            end_date: Some(String::new()),
            selected_year: None,
        };
        assert_eq!(build_query(&whitespace, &pagination), "limit=5&page=1");
    }

    #[test]
    fn test_all_fields_in_wire_order() {
        let filter = FilterState::new()
            .with_title("roads")
            .with_author("Infrastructure")
            .with_producer("Highways")
            .with_request_text("gritting")
            .with_response_text("salt")
            .with_year("2023");
        let mut pagination = PaginationState::new(PageSize::new(20).unwrap());
        pagination.apply_total_pages(Some(4));
        pagination.set_page(2).unwrap();

        let names: Vec<&str> = QueryBuilder::new(&filter, &pagination)
            .pairs()
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        assert_eq!(
            names,
            vec![
                "limit",
                "title",
                "startDate",
                "endDate",
                "author",
                "producer",
                "requestText",
                "responseText",
                "page"
            ]
        );
    }

    #[test]
    fn test_values_are_form_encoded() {
        let filter = FilterState::new()
            .with_title("parking & fines")
            .with_year("2021");
        let query = build_query(&filter, &PaginationState::default());

        assert_eq!(
            query,
            "limit=5&title=parking+%26+fines&startDate=2021%2F01%2F01&endDate=2021%2F12%2F31&page=1"
        );
    }

    #[test]
    fn test_text_is_not_trimmed() {
        let filter = FilterState::new().with_title(" fox ");
        let pairs = QueryBuilder::new(&filter, &PaginationState::default()).pairs();
        assert_eq!(pairs[1], ("title", " fox ".to_string()));
    }
}
