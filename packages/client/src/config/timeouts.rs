//! Timeout configuration methods
//!
//! Builder methods for the per-phase budgets. Each budget becomes a fresh
//! deadline when its phase starts; budgets are never shared across phases.

use std::time::Duration;

use super::CheckerConfig;

impl CheckerConfig {
    /// Set every phase budget at once
    ///
    /// # Examples
    /// ```no_run
    /// use std::time::Duration;
    /// use proxyprobe_client::config::CheckerConfig;
    ///
    /// let config = CheckerConfig::default().with_timeout(Duration::from_secs(3));
    /// assert_eq!(config.read_timeout, Duration::from_secs(3));
    /// ```
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_connect_timeout(timeout)
            .with_read_timeout(timeout)
            .with_tls_timeout(timeout)
    }

    /// Set the TCP connect budget
    ///
    /// Covers name resolution and the TCP handshake with the proxy.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the budget for each write and read phase on an open connection
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_tls_timeout(mut self, timeout: Duration) -> Self {
        self.tls_timeout = timeout;
        self
    }
}
