//! Endpoint descriptors
//!
//! Normalizes the caller's proxy string and target URL into immutable,
//! validated descriptors before any socket is opened.

pub mod proxy;
pub mod target;

pub use proxy::{DEFAULT_PROXY_PORT, ProxyDescriptor};
pub use target::{Scheme, TargetDescriptor};

/// Bracket IPv6 literals so the host can sit in an authority.
pub(crate) fn bracket_host(host: &str) -> std::borrow::Cow<'_, str> {
    if host.contains(':') {
        format!("[{host}]").into()
    } else {
        host.into()
    }
}

/// Host as a string without IPv6 brackets, suitable for socket connects.
pub(crate) fn host_string(url: &url::Url) -> Option<String> {
    match url.host()? {
        url::Host::Domain(domain) => Some(domain.to_string()),
        url::Host::Ipv4(addr) => Some(addr.to_string()),
        url::Host::Ipv6(addr) => Some(addr.to_string()),
    }
}
