use super::BoxError;
use super::helpers::{ConnectionClosed, TimedOut};
use super::types::{Error, Kind};

/// Creates an `Error` for a proxy string that cannot be used.
pub fn invalid_proxy<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::InvalidProxy).with(e.into())
}

/// Creates an `Error` for a target URL that cannot be parsed.
pub fn invalid_target<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::InvalidTarget).with(e.into())
}

pub fn unsupported_scheme(url: url::Url) -> Error {
    let scheme = url.scheme().to_string();
    Error::new(Kind::UnsupportedScheme)
        .with(format!("scheme '{scheme}'"))
        .with_url(url)
}

pub fn connect_timeout() -> Error {
    Error::new(Kind::ConnectTimeout).with(TimedOut)
}

pub fn read_timeout() -> Error {
    Error::new(Kind::ReadTimeout).with(TimedOut)
}

pub fn headers_too_large(limit: usize) -> Error {
    Error::new(Kind::HeadersTooLarge).with(format!("no header delimiter within {limit} bytes"))
}

pub fn connect_rejected(status: u16, reason: impl Into<String>) -> Error {
    Error::new(Kind::ConnectRejected {
        status,
        reason: reason.into(),
    })
}

/// Creates an `Error` for a failed TLS handshake.
pub fn tls_handshake<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::TlsHandshake).with(e.into())
}

pub fn tls_timeout() -> Error {
    Error::new(Kind::TlsHandshake).with(TimedOut)
}

/// Creates an `Error` for a generic socket failure.
pub fn network<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Network).with(e.into())
}

/// Creates an `Error` for a peer that closed before a complete header block.
pub fn connection_closed() -> Error {
    Error::new(Kind::Network).with(ConnectionClosed)
}
