//! HTTP CONNECT tunnel establishment
//!
//! Sends the CONNECT request over an open proxy socket and reads the proxy's
//! answer. Only a 2xx status turns the socket into a tunnel; anything else is
//! reported as `ConnectRejected` and the TLS stage never starts.

use tokio::io::{AsyncRead, AsyncWrite};

use super::io::write_all_by;
use crate::connect::Deadline;
use crate::endpoint::{ProxyDescriptor, TargetDescriptor};
use crate::error;
use crate::http::frame::{HEADER_DELIMITER, read_until};
use crate::http::headers::{ResponseHead, parse_status_and_headers};
use crate::http::request::build_connect_request;

/// Write `CONNECT target HTTP/1.1` to the proxy.
pub async fn send_connect_request<S>(
    proxy_stream: &mut S,
    proxy: &ProxyDescriptor,
    target: &TargetDescriptor,
    deadline: Deadline,
) -> crate::Result<()>
where
    S: AsyncWrite + Unpin,
{
    let request = build_connect_request(proxy, target);
    write_all_by(proxy_stream, request.as_bytes(), deadline).await
}

/// Read the proxy's answer to CONNECT and decide whether the tunnel is up.
///
/// # Errors
///
/// `ConnectRejected` for any non-2xx status (including an unparsable status
/// line, reported as 0), plus the frame reader's errors.
pub async fn read_connect_response<S>(
    proxy_stream: &mut S,
    max_header_bytes: usize,
    deadline: Deadline,
) -> crate::Result<ResponseHead>
where
    S: AsyncRead + Unpin,
{
    let frame = read_until(proxy_stream, HEADER_DELIMITER, max_header_bytes, deadline).await?;
    let head = parse_status_and_headers(&frame.head);

    if !(200..300).contains(&head.status_code) {
        tracing::debug!("CONNECT rejected: {} {}", head.status_code, head.status_text);
        return Err(error::connect_rejected(head.status_code, head.status_text));
    }

    if !frame.tail.is_empty() {
        // The TLS server never speaks first, so anything here is proxy noise.
        tracing::warn!(
            "Discarding {} bytes received after CONNECT response",
            frame.tail.len()
        );
    }

    Ok(head)
}
