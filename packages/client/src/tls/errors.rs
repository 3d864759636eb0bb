//! TLS setup errors

/// Errors raised while building the TLS client configuration
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("Certificate parsing failed: {0}")]
    CertificateParsing(String),
    #[error("No trusted root certificates available")]
    EmptyRootStore,
    #[error("Invalid server name: {0}")]
    InvalidServerName(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TlsError> for crate::config::ConfigurationError {
    fn from(error: TlsError) -> Self {
        crate::config::ConfigurationError::Tls(error.to_string())
    }
}
