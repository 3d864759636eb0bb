//! Incoming check requests

use serde::{Deserialize, Serialize};

/// Parameters of one check: `proxy` is required, `url` optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub proxy: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl CheckRequest {
    pub fn new(proxy: impl Into<String>) -> Self {
        Self {
            proxy: Some(proxy.into()),
            url: None,
        }
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Build from a raw query string such as `proxy=1.2.3.4%3A8080&url=…`.
    ///
    /// Unknown keys are ignored; for repeated keys the last value wins.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut request = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "proxy" => request.proxy = Some(value.into_owned()),
                "url" => request.url = Some(value.into_owned()),
                _ => {}
            }
        }
        request
    }

    /// `proxy`, trimmed, when present and non-blank
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }

    /// `url`, trimmed, when present and non-blank
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}
