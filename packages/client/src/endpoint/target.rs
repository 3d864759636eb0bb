//! Target URL parsing

use std::fmt;

use url::Url;

use crate::endpoint::{bracket_host, host_string};
use crate::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated http/https target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    scheme: Scheme,
    host: String,
    port: u16,
    path: String,
    url: Url,
}

impl TargetDescriptor {
    /// Parse a target URL
    ///
    /// # Errors
    ///
    /// `InvalidTarget` if the URL does not parse or has no host,
    /// `UnsupportedScheme` for anything other than http and https.
    pub fn parse(input: &str) -> crate::Result<Self> {
        let mut url = Url::parse(input.trim())
            .map_err(|e| error::invalid_target(format!("Invalid url '{}': {e}", input.trim())))?;

        let scheme = match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            _ => return Err(error::unsupported_scheme(url)),
        };

        let host = host_string(&url)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| error::invalid_target("url has no host"))?;

        let port = url.port().unwrap_or_else(|| scheme.default_port());

        let mut path = match url.path() {
            "" => "/".to_string(),
            p => p.to_string(),
        };
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }

        url.set_fragment(None);

        Ok(Self { scheme, host, port, path, url })
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn is_https(&self) -> bool {
        self.scheme == Scheme::Https
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Origin-form request target: path plus query
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Absolute-form request target
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// `host:port` for CONNECT, with IPv6 hosts bracketed
    pub fn authority(&self) -> String {
        format!("{}:{}", bracket_host(&self.host), self.port)
    }

    /// `Host` header value; the port is omitted when it is the scheme default
    pub fn host_header(&self) -> String {
        if self.port == self.scheme.default_port() {
            bracket_host(&self.host).into_owned()
        } else {
            self.authority()
        }
    }
}

impl std::str::FromStr for TargetDescriptor {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
