//! Delimiter-framed reads
//!
//! Accumulates bytes from a stream until a delimiter shows up, under a hard
//! cap. Whatever arrived after the delimiter is handed back as the tail so
//! the body reader can start from it.

use bytes::{Bytes, BytesMut};
use memchr::memmem;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::connect::Deadline;
use crate::error;

/// Empty line terminating an HTTP header block.
pub const HEADER_DELIMITER: &[u8] = b"\r\n\r\n";

const READ_CHUNK: usize = 8 * 1024;

/// A header block and the bytes read past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Everything up to and including the delimiter
    pub head: Bytes,
    /// Bytes already received after the delimiter
    pub tail: Bytes,
}

/// Read from `reader` until `delimiter` is seen.
///
/// # Errors
///
/// - `HeadersTooLarge` when more than `max_bytes` arrive with no delimiter
///   ending inside the first `max_bytes`
/// - `Network` when the peer closes first or the read fails
/// - `ReadTimeout` when `deadline` passes
pub async fn read_until<R>(
    reader: &mut R,
    delimiter: &[u8],
    max_bytes: usize,
    deadline: Deadline,
) -> crate::Result<Frame>
where
    R: AsyncRead + Unpin,
{
    let finder = memmem::Finder::new(delimiter);
    let overlap = delimiter.len().saturating_sub(1);
    let mut buf = BytesMut::with_capacity(READ_CHUNK);
    let mut scanned: usize = 0;

    loop {
        // Only bytes that could still complete a match need rescanning.
        let start = scanned.saturating_sub(overlap);
        if let Some(pos) = finder.find(&buf[start..]) {
            let end = start + pos + delimiter.len();
            if end > max_bytes {
                return Err(error::headers_too_large(max_bytes));
            }
            let head = buf.split_to(end).freeze();
            return Ok(Frame {
                head,
                tail: buf.freeze(),
            });
        }
        scanned = buf.len();

        if buf.len() > max_bytes {
            return Err(error::headers_too_large(max_bytes));
        }

        buf.reserve(READ_CHUNK);
        match deadline.run(reader.read_buf(&mut buf)).await {
            Ok(Ok(0)) => return Err(error::connection_closed()),
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(error::network(e)),
            Err(_) => return Err(error::read_timeout()),
        }
    }
}
