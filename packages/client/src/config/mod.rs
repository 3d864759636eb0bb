//! Checker configuration
//!
//! Plain configuration struct with production defaults, consuming `with_*`
//! builder methods and validation. Nothing here reads the environment.

use std::time::Duration;

pub mod timeouts;
pub mod validation;

pub use validation::{ConfigResult, ConfigValidator, ConfigurationError, Validator};

/// Per-phase budget shared by connect, read and TLS handshake by default.
pub const DEFAULT_PHASE_TIMEOUT: Duration = Duration::from_millis(6500);

/// Header block cap before the delimiter must have been seen.
pub const DEFAULT_MAX_HEADER_BYTES: usize = 256 * 1024;

/// Body bytes retained per response.
pub const DEFAULT_MAX_BODY_BYTES: usize = 96 * 1024;

/// Characters of the body kept for IP extraction.
pub const DEFAULT_PREVIEW_CHARS: usize = 2000;

/// Upper bound on the probe fallback list.
pub const MAX_PROBE_URLS: usize = 8;

pub const DEFAULT_USER_AGENT: &str = "ProxyProbe/0.1";

/// Well-known "echo my IP" endpoints tried in order when no target is given.
pub const DEFAULT_PROBE_URLS: [&str; 2] = ["https://api.ipify.org?format=json", "https://icanhazip.com/"];

/// TLS trust configuration for the tunnelled handshake
#[derive(Debug, Clone)]
pub struct TlsConfig {
    /// Load the platform certificate store in addition to the bundled webpki roots
    pub use_native_certs: bool,
    /// Extra PEM-encoded root certificates
    pub custom_root_certs: Vec<String>,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            use_native_certs: true,
            custom_root_certs: Vec::new(),
        }
    }
}

/// Configuration for a [`ProxyChecker`](crate::verify::ProxyChecker)
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    // Phase budgets
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub tls_timeout: Duration,

    // Buffer limits
    pub max_header_bytes: usize,
    pub max_body_bytes: usize,
    pub preview_chars: usize,

    pub user_agent: String,
    pub probe_urls: Vec<String>,
    pub tls: TlsConfig,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_PHASE_TIMEOUT,
            read_timeout: DEFAULT_PHASE_TIMEOUT,
            tls_timeout: DEFAULT_PHASE_TIMEOUT,

            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            preview_chars: DEFAULT_PREVIEW_CHARS,

            user_agent: DEFAULT_USER_AGENT.to_string(),
            probe_urls: DEFAULT_PROBE_URLS.iter().map(|u| (*u).to_string()).collect(),
            tls: TlsConfig::default(),
        }
    }
}

impl CheckerConfig {
    /// Set the header block cap
    #[must_use]
    pub fn with_max_header_bytes(mut self, limit: usize) -> Self {
        self.max_header_bytes = limit;
        self
    }

    /// Set the retained body cap
    #[must_use]
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Replace the probe list used when no target URL is supplied
    #[must_use]
    pub fn with_probe_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.probe_urls = urls.into_iter().map(Into::into).collect();
        self
    }

    /// Toggle loading of the platform certificate store
    #[must_use]
    pub fn with_native_certs(mut self, enabled: bool) -> Self {
        self.tls.use_native_certs = enabled;
        self
    }

    /// Trust an additional PEM-encoded root certificate
    #[must_use]
    pub fn with_root_certificate_pem(mut self, pem: impl Into<String>) -> Self {
        self.tls.custom_root_certs.push(pem.into());
        self
    }
}
