//! TLS connection manager
//!
//! Builds one immutable rustls client configuration up front and performs
//! hostname-bound handshakes over tunnelled sockets with it.

use std::sync::Arc;
use std::time::Duration;

use rustls::pki_types::{CertificateDer, ServerName};
use rustls::{ClientConfig, RootCertStore};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;

use super::errors::TlsError;
use crate::config::TlsConfig;
use crate::connect::Deadline;
use crate::error;

/// Shared, read-only TLS client state
#[derive(Clone)]
pub struct TlsManager {
    connector: TlsConnector,
}

impl std::fmt::Debug for TlsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsManager").finish_non_exhaustive()
    }
}

impl TlsManager {
    /// Create TLS manager with specific configuration
    ///
    /// # Errors
    ///
    /// Fails if a custom root is not valid PEM, if no roots end up trusted,
    /// or if rustls rejects the protocol setup.
    pub fn with_config(config: &TlsConfig) -> Result<Self, TlsError> {
        let client_config = create_client_config(config)?;
        Ok(Self {
            connector: TlsConnector::from(Arc::new(client_config)),
        })
    }

    /// Handshake over `stream`, binding to `host` for SNI and certificate checks.
    ///
    /// # Errors
    ///
    /// `TlsHandshake` on an unusable host name, a handshake failure, or the
    /// deadline passing (flagged as a timeout).
    pub async fn upgrade(
        &self,
        stream: TcpStream,
        host: &str,
        budget: Duration,
    ) -> crate::Result<TlsStream<TcpStream>> {
        let server_name = ServerName::try_from(host.to_string())
            .map_err(|e| error::tls_handshake(TlsError::InvalidServerName(format!("{host}: {e}"))))?;

        tracing::debug!("Starting TLS handshake with {} through tunnel", host);

        match Deadline::after(budget)
            .run(self.connector.connect(server_name, stream))
            .await
        {
            Ok(Ok(tls_stream)) => Ok(tls_stream),
            Ok(Err(e)) => {
                tracing::debug!("TLS handshake with {} failed: {}", host, e);
                Err(error::tls_handshake(format!("TLS error: {e}")))
            }
            Err(_) => {
                tracing::debug!("TLS handshake with {} timed out after {:?}", host, budget);
                Err(error::tls_timeout())
            }
        }
    }
}

/// Client configuration with full certificate validation
fn create_client_config(config: &TlsConfig) -> Result<ClientConfig, TlsError> {
    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    if config.use_native_certs {
        let cert_result = rustls_native_certs::load_native_certs();
        for cert in cert_result.certs {
            if let Err(e) = root_store.add(cert) {
                tracing::warn!("Failed to add system certificate: {}", e);
            }
        }
        for err in &cert_result.errors {
            tracing::warn!("Certificate load error: {}", err);
        }
    }

    for cert_pem in &config.custom_root_certs {
        let parsed = pem::parse(cert_pem)
            .map_err(|e| TlsError::CertificateParsing(e.to_string()))?;
        let cert = CertificateDer::from(parsed.contents().to_vec());
        root_store
            .add(cert)
            .map_err(|e| TlsError::CertificateParsing(e.to_string()))?;
        tracing::debug!("Added custom root certificate from PEM data");
    }

    if root_store.is_empty() {
        return Err(TlsError::EmptyRootStore);
    }
    tracing::debug!("TLS root store holds {} certificates", root_store.len());

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let client_config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| TlsError::Internal(e.to_string()))?
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(client_config)
}
