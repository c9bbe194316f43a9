//! Server-supplied HTML.
//!
//! Request and response bodies arrive as HTML and are displayed as markup,
//! not escaped text. No sanitization happens here: the API is the trust
//! boundary and is assumed to produce safe markup. Wrapping the string in
//! [`TrustedHtml`] keeps that assumption visible at every use site.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

const GOV_JE_ORIGIN: &str = "https://gov.je";

/// Site-relative `href` attributes, e.g. `href="/government/..."`
static RELATIVE_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href="(/[^"]*)""#).expect("relative href pattern is valid"));

/// HTML received from the API and rendered without sanitization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    /// Mark markup from the API as trusted
    pub fn from_server(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Rewrite site-relative links so they resolve against gov.je
    pub fn with_absolute_gov_je_links(self) -> Self {
        let rewritten = RELATIVE_HREF.replace_all(&self.0, |caps: &regex::Captures<'_>| {
            format!(r#"href="{}{}""#, GOV_JE_ORIGIN, &caps[1])
        });
        Self(rewritten.into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
