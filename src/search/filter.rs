//! User-editable search criteria

use serde::{Deserialize, Serialize};

/// Search criteria as entered by the user. Editing a field never issues a
/// request; the controller reads the filter when a search runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub title: Option<String>,
    pub author: Option<String>,
    pub producer: Option<String>,
    pub request_text: Option<String>,
    pub response_text: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,

    /// Year checkbox currently ticked, if any
    pub selected_year: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = Some(producer.into());
        self
    }

    pub fn with_request_text(mut self, text: impl Into<String>) -> Self {
        self.request_text = Some(text.into());
        self
    }

    pub fn with_response_text(mut self, text: impl Into<String>) -> Self {
        self.response_text = Some(text.into());
        self
    }

    /// Manual date range. Does not touch `selected_year`.
    pub fn with_date_range(
        mut self,
        start: Option<impl Into<String>>,
        end: Option<impl Into<String>>,
    ) -> Self {
        self.start_date = start.map(Into::into);
        self.end_date = end.map(Into::into);
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.select_year(year);
        self
    }

    /// Tick a year: the date range becomes `Y/01/01`..`Y/12/31`, replacing
    /// any manually entered range.
    pub fn select_year(&mut self, year: impl Into<String>) {
        let year = year.into();
        self.start_date = Some(format!("{}/01/01", year));
        self.end_date = Some(format!("{}/12/31", year));
        self.selected_year = Some(year);
    }

    /// Untick the year: clears the year and both dates
    pub fn clear_year(&mut self) {
        self.selected_year = None;
        self.start_date = None;
        self.end_date = None;
    }

    /// Checkbox handler for the year list
    pub fn toggle_year(&mut self, year: impl Into<String>, checked: bool) {
        if checked {
            self.select_year(year);
        } else {
            self.clear_year();
        }
    }

    pub fn is_year_selected(&self, year: &str) -> bool {
        self.selected_year.as_deref() == Some(year)
    }

    /// True when no field would reach the query string
    pub fn is_blank(&self) -> bool {
        [
            &self.title,
            &self.author,
            &self.producer,
            &self.request_text,
            &self.response_text,
            &self.start_date,
            &self.end_date,
        ]
        .into_iter()
        .all(|field| non_blank(field).is_none())
    }
}

/// Field value if it carries anything besides whitespace. The value itself is
/// returned verbatim.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_year_sets_full_year_range() {
        let mut filter = FilterState::new();
        filter.select_year("2021");

        assert_eq!(filter.selected_year.as_deref(), Some("2021"));
        assert_eq!(filter.start_date.as_deref(), Some("2021/01/01"));
        assert_eq!(filter.end_date.as_deref(), Some("2021/12/31"));
        assert!(filter.is_year_selected("2021"));
    }

    #[test]
    fn test_select_year_overwrites_manual_range() {
        let mut filter = FilterState::new().with_date_range(Some("2019/03/01"), Some("2019/04/01"));
        filter.select_year("2022");

        assert_eq!(filter.start_date.as_deref(), Some("2022/01/01"));
        assert_eq!(filter.end_date.as_deref(), Some("2022/12/31"));
    }

    #[test]
    fn test_deselect_year_clears_dates() {
        let mut filter = FilterState::new().with_year("2020");
        filter.toggle_year("2020", false);

        assert_eq!(filter.selected_year, None);
        assert_eq!(filter.start_date, None);
        assert_eq!(filter.end_date, None);
    }

    #[test]
    fn test_manual_date_edit_keeps_selected_year() {
        let mut filter = FilterState::new().with_year("2020");
        filter.start_date = Some("2020/06/01".to_string());

        assert!(filter.is_year_selected("2020"));
    }

    #[test]
    fn test_blank_detection() {
        assert!(FilterState::new().is_blank());
        assert!(FilterState::new().with_title("   ").with_author("").is_blank());
        assert!(!FilterState::new().with_producer("Health").is_blank());
    }

    #[test]
    fn test_non_blank_is_verbatim() {
        assert_eq!(non_blank(&Some("  gritting ".to_string())), Some("  gritting "));
        assert_eq!(non_blank(&Some("\t".to_string())), None);
        assert_eq!(non_blank(&None), None);
    }
}
