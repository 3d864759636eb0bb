//! Proxy descriptor parsing
//!
//! Accepts `host:port`, `user:pass@host:port`, or any `scheme://…` URL. The
//! scheme is never used to pick a transport; every proxy is spoken to as an
//! HTTP proxy.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::auth::proxy_authorization_line;
use crate::endpoint::{bracket_host, host_string};
use crate::error;

/// Port used when the proxy string names none.
pub const DEFAULT_PROXY_PORT: u16 = 8080;

static SCHEME_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").expect("static scheme pattern is valid")
});

/// A validated forward-proxy endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyDescriptor {
    host: String,
    port: u16,
    auth_header: Option<String>,
}

impl ProxyDescriptor {
    /// Parse a raw proxy string
    ///
    /// # Errors
    ///
    /// Returns an `InvalidProxy` error when the string is empty, does not parse
    /// as a URL, has an empty host, or names a port outside 1..=65535.
    pub fn parse(input: &str) -> crate::Result<Self> {
        let normalized = normalize_proxy_input(input)
            .ok_or_else(|| error::invalid_proxy("empty proxy string"))?;

        let url = Url::parse(&normalized)
            .map_err(|e| error::invalid_proxy(format!("Invalid proxy '{}': {e}", input.trim())))?;

        let host = host_string(&url)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| error::invalid_proxy("Invalid proxy host"))?;

        // `url` drops ports equal to the scheme default, so look at the input too.
        let port = match url.port() {
            Some(port) => port,
            None if has_explicit_port(&normalized) => url
                .port_or_known_default()
                .ok_or_else(|| error::invalid_proxy("Invalid proxy port"))?,
            None => DEFAULT_PROXY_PORT,
        };
        if port == 0 {
            return Err(error::invalid_proxy("Invalid proxy port"));
        }

        let auth_header = if !url.username().is_empty() || url.password().is_some() {
            let username = percent_decode(url.username())?;
            let password = percent_decode(url.password().unwrap_or_default())?;
            Some(proxy_authorization_line(&username, &password))
        } else {
            None
        };

        Ok(Self { host, port, auth_header })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The full `Proxy-Authorization: Basic …` line, without CRLF
    pub fn auth_header(&self) -> Option<&str> {
        self.auth_header.as_deref()
    }

    /// `host:port`, with IPv6 hosts bracketed
    pub fn authority(&self) -> String {
        format!("{}:{}", bracket_host(&self.host), self.port)
    }
}

impl std::str::FromStr for ProxyDescriptor {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ProxyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.authority())
    }
}

impl fmt::Debug for ProxyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyDescriptor")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("auth", &self.auth_header.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Trim and prefix `http://` when the input carries no scheme.
fn normalize_proxy_input(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if SCHEME_PREFIX.is_match(trimmed) {
        Some(trimmed.to_string())
    } else {
        Some(format!("http://{trimmed}"))
    }
}

/// Whether the authority of `normalized` spells out a port.
fn has_explicit_port(normalized: &str) -> bool {
    let Some((_, rest)) = normalized.split_once("://") else {
        return false;
    };
    let authority = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host_port)| host_port);
    let after_host = match host_port.rfind(']') {
        Some(idx) => &host_port[idx + 1..],
        None => host_port,
    };

    after_host
        .rsplit_once(':')
        .is_some_and(|(_, port)| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}

fn percent_decode(raw: &str) -> crate::Result<String> {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| error::invalid_proxy(format!("Invalid proxy credentials: {e}")))
}
