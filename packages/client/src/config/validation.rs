//! Configuration validation

use std::time::Duration;

use super::{CheckerConfig, MAX_PROBE_URLS};

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid timeout value: {0}")]
    InvalidTimeout(String),

    #[error("Invalid buffer size: {0}")]
    InvalidBufferSize(String),

    #[error("Invalid configuration parameter: {0}")]
    InvalidParameter(String),

    #[error("TLS setup failed: {0}")]
    Tls(String),
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` variant describing the first invalid setting.
    fn validate(&self) -> ConfigResult<()>;
}

/// Common configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate timeout duration
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidTimeout` if the duration is zero or exceeds 1 hour.
    pub fn validate_timeout(timeout: Duration, name: &str) -> ConfigResult<()> {
        if timeout.is_zero() {
            return Err(ConfigurationError::InvalidTimeout(format!(
                "{name} cannot be zero"
            )));
        }

        if timeout.as_secs() > 3600 {
            return Err(ConfigurationError::InvalidTimeout(format!(
                "{name} cannot exceed 1 hour"
            )));
        }

        Ok(())
    }

    /// Validate buffer size
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidBufferSize` if the size is zero or exceeds 16 MiB.
    pub fn validate_buffer_size(size: usize, name: &str) -> ConfigResult<()> {
        if size == 0 {
            return Err(ConfigurationError::InvalidBufferSize(format!(
                "{name} cannot be zero"
            )));
        }

        if size > 16 * 1024 * 1024 {
            return Err(ConfigurationError::InvalidBufferSize(format!(
                "{name} cannot exceed 16 MiB"
            )));
        }

        Ok(())
    }
}

impl Validator for CheckerConfig {
    fn validate(&self) -> ConfigResult<()> {
        ConfigValidator::validate_timeout(self.connect_timeout, "connect_timeout")?;
        ConfigValidator::validate_timeout(self.read_timeout, "read_timeout")?;
        ConfigValidator::validate_timeout(self.tls_timeout, "tls_timeout")?;

        ConfigValidator::validate_buffer_size(self.max_header_bytes, "max_header_bytes")?;
        ConfigValidator::validate_buffer_size(self.max_body_bytes, "max_body_bytes")?;

        if self.probe_urls.is_empty() || self.probe_urls.len() > MAX_PROBE_URLS {
            return Err(ConfigurationError::InvalidParameter(format!(
                "probe_urls must hold between 1 and {MAX_PROBE_URLS} entries, got {}",
                self.probe_urls.len()
            )));
        }

        if self.user_agent.contains(['\r', '\n']) {
            return Err(ConfigurationError::InvalidParameter(
                "user_agent cannot contain line breaks".to_string(),
            ));
        }

        Ok(())
    }
}
