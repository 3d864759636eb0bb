//! Request builders
//!
//! Requests are written by hand so the exact bytes on the wire are known:
//! identity encoding and `Connection: close` keep body framing down to
//! "read until the server hangs up".

use std::fmt::Write;

use crate::endpoint::{ProxyDescriptor, TargetDescriptor};

/// Absolute-form GET sent to the proxy for plain-HTTP targets.
pub fn build_plain_request(
    proxy: &ProxyDescriptor,
    target: &TargetDescriptor,
    user_agent: &str,
) -> String {
    build_get(target.url().as_str(), target, proxy.auth_header(), user_agent)
}

/// Origin-form GET sent through an established tunnel.
///
/// The proxy already authenticated the CONNECT, so no auth header here.
pub fn build_tunneled_request(target: &TargetDescriptor, user_agent: &str) -> String {
    build_get(target.path(), target, None, user_agent)
}

/// CONNECT request opening a tunnel to `target`.
pub fn build_connect_request(proxy: &ProxyDescriptor, target: &TargetDescriptor) -> String {
    let authority = target.authority();
    let mut request = format!("CONNECT {authority} HTTP/1.1\r\nHost: {authority}\r\n");
    push_auth(&mut request, proxy.auth_header());
    request.push_str("Proxy-Connection: keep-alive\r\n");
    request.push_str("Connection: keep-alive\r\n\r\n");
    request
}

fn build_get(
    request_target: &str,
    target: &TargetDescriptor,
    auth_header: Option<&str>,
    user_agent: &str,
) -> String {
    let mut request = String::with_capacity(256);
    let _ = write!(
        request,
        "GET {request_target} HTTP/1.1\r\nHost: {}\r\n",
        target.host_header()
    );
    push_auth(&mut request, auth_header);
    let _ = write!(request, "User-Agent: {user_agent}\r\n");
    request.push_str("Accept: */*\r\n");
    request.push_str("Accept-Encoding: identity\r\n");
    request.push_str("Connection: close\r\n\r\n");
    request
}

fn push_auth(request: &mut String, auth_header: Option<&str>) {
    if let Some(line) = auth_header {
        request.push_str(line);
        request.push_str("\r\n");
    }
}
