use std::error::Error as StdError;
use std::fmt;

/// A Result alias where the Err case is `proxyprobe_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors that can occur while verifying a proxy.
pub struct Error {
    pub inner: Box<Inner>,
}

pub struct Inner {
    pub kind: Kind,
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub url: Option<url::Url>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// Proxy string is empty, unparsable, or names an unusable host/port
    InvalidProxy,
    /// Target URL is unparsable or has no host
    InvalidTarget,
    /// Target URL scheme is neither http nor https
    UnsupportedScheme,
    /// TCP handshake with the proxy did not finish in time
    ConnectTimeout,
    /// A read or write on an established connection did not finish in time
    ReadTimeout,
    /// Header block grew past the configured cap without a delimiter
    HeadersTooLarge,
    /// Proxy answered CONNECT with a non-2xx status
    ConnectRejected { status: u16, reason: String },
    /// TLS handshake through the tunnel failed or timed out
    TlsHandshake,
    /// Any other socket-level failure
    Network,
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner { kind, source: None, url: None }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: url::Url) -> Self {
        self.inner.url = Some(url);
        self
    }

    #[must_use]
    pub fn kind(&self) -> &Kind {
        &self.inner.kind
    }

    /// Get the URL associated with this error, if any
    #[must_use]
    pub fn url(&self) -> Option<&url::Url> {
        self.inner.url.as_ref()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("proxyprobe_client::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref url) = self.inner.url {
            f.field("url", url);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.kind {
            Kind::InvalidProxy => f.write_str("invalid proxy")?,
            Kind::InvalidTarget => f.write_str("invalid target url")?,
            Kind::UnsupportedScheme => f.write_str("only http/https targets are supported")?,
            Kind::ConnectTimeout => f.write_str("proxy tcp connect timed out")?,
            Kind::ReadTimeout => f.write_str("read timeout")?,
            Kind::HeadersTooLarge => f.write_str("headers too large")?,
            Kind::ConnectRejected { status, reason } => {
                if reason.is_empty() {
                    write!(f, "CONNECT rejected ({status})")?;
                } else {
                    write!(f, "CONNECT rejected ({status} {reason})")?;
                }
            }
            Kind::TlsHandshake => f.write_str("tls handshake failed")?,
            Kind::Network => f.write_str("network error")?,
        }

        if let Some(ref source) = self.inner.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
