use std::error::Error as StdError;
use std::io;

use super::helpers::TimedOut;
use super::types::{Error, Kind};

impl Error {
    /// Returns true if the error came from validating caller input, before any I/O.
    #[must_use]
    pub fn is_input(&self) -> bool {
        matches!(
            self.inner.kind,
            Kind::InvalidProxy | Kind::InvalidTarget | Kind::UnsupportedScheme
        )
    }

    /// Returns true if the error is related to a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        if matches!(self.inner.kind, Kind::ConnectTimeout | Kind::ReadTimeout) {
            return true;
        }

        let mut source = self.source();

        while let Some(err) = source {
            if err.is::<TimedOut>() {
                return true;
            }
            if let Some(io) = err.downcast_ref::<io::Error>()
                && io.kind() == io::ErrorKind::TimedOut {
                    return true;
                }
            source = err.source();
        }

        false
    }

    /// Returns true if the TLS stage failed.
    #[must_use]
    pub fn is_tls(&self) -> bool {
        matches!(self.inner.kind, Kind::TlsHandshake)
    }

    /// Returns the proxy's CONNECT status, if the tunnel was refused.
    #[must_use]
    pub fn connect_status(&self) -> Option<(u16, &str)> {
        match &self.inner.kind {
            Kind::ConnectRejected { status, reason } => Some((*status, reason.as_str())),
            _ => None,
        }
    }
}
