//! HTTP/1.1 framing over raw byte streams
//!
//! Hand-rolled request builders, a bounded delimiter reader, a status/header
//! parser, and a "read headers, then a bounded body" response primitive.

pub mod frame;
pub mod headers;
pub mod request;
pub mod response;

pub use frame::{Frame, HEADER_DELIMITER, read_until};
pub use headers::{ResponseHead, parse_status_and_headers};
pub use request::{build_connect_request, build_plain_request, build_tunneled_request};
pub use response::{RawResponse, ResponseLimits, read_response};
