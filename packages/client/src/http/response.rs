//! Response capture: headers first, then a bounded body
//!
//! The body is read until the peer closes, the read fails, the body deadline
//! passes, or the cap is reached. None of those end the exchange with an
//! error; the body is best-effort and the verdict comes from the status.

use std::time::Duration;

use bytes::BytesMut;
use hashbrown::HashMap;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::frame::{HEADER_DELIMITER, read_until};
use super::headers::{ResponseHead, parse_status_and_headers};
use crate::connect::Deadline;

const BODY_CHUNK: usize = 8 * 1024;

/// Buffer limits and phase budget for one response
#[derive(Debug, Clone, Copy)]
pub struct ResponseLimits {
    pub max_header_bytes: usize,
    pub max_body_bytes: usize,
    pub read_timeout: Duration,
}

/// One response as seen on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status_code: u16,
    pub status_text: String,
    pub headers: HashMap<String, String>,
    /// Body prefix, at most `max_body_bytes`
    pub body: Vec<u8>,
    pub bytes_read: usize,
}

impl RawResponse {
    /// 2xx and 3xx count as the proxy having relayed the request
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status_code)
    }

    /// First `max_chars` characters of the body, lossily decoded and trimmed
    pub fn preview(&self, max_chars: usize) -> String {
        let text = String::from_utf8_lossy(&self.body);
        let cut = text
            .char_indices()
            .nth(max_chars)
            .map_or(text.len(), |(idx, _)| idx);
        text[..cut].trim().to_string()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name.to_ascii_lowercase().as_str())
            .map(String::as_str)
    }
}

/// Read one response from `stream`.
///
/// # Errors
///
/// Only the header phase can fail (`HeadersTooLarge`, `ReadTimeout`,
/// `Network`); body problems just end the body.
pub async fn read_response<S>(stream: &mut S, limits: &ResponseLimits) -> crate::Result<RawResponse>
where
    S: AsyncRead + Unpin,
{
    let frame = read_until(
        stream,
        HEADER_DELIMITER,
        limits.max_header_bytes,
        Deadline::after(limits.read_timeout),
    )
    .await?;
    let ResponseHead {
        status_code,
        status_text,
        headers,
    } = parse_status_and_headers(&frame.head);

    let mut body = BytesMut::with_capacity(limits.max_body_bytes.min(BODY_CHUNK));
    let seed = frame.tail.len().min(limits.max_body_bytes);
    body.extend_from_slice(&frame.tail[..seed]);

    read_body(stream, &mut body, limits.max_body_bytes, Deadline::after(limits.read_timeout)).await;

    let bytes_read = body.len();
    Ok(RawResponse {
        status_code,
        status_text,
        headers,
        body: body.to_vec(),
        bytes_read,
    })
}

async fn read_body<S>(stream: &mut S, body: &mut BytesMut, cap: usize, deadline: Deadline)
where
    S: AsyncRead + Unpin,
{
    let mut chunk = [0u8; BODY_CHUNK];

    while body.len() < cap {
        match deadline.run(stream.read(&mut chunk)).await {
            Ok(Ok(0)) => break,
            Ok(Ok(n)) => {
                let take = n.min(cap - body.len());
                body.extend_from_slice(&chunk[..take]);
            }
            Ok(Err(e)) => {
                tracing::debug!("Body read ended with error after {} bytes: {}", body.len(), e);
                break;
            }
            Err(_) => {
                tracing::debug!("Body read hit its deadline after {} bytes", body.len());
                break;
            }
        }
    }
}
