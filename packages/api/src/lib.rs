//! ProxyProbe public API
//!
//! The request/response boundary of the proxy checker: query parameters in,
//! an HTTP status plus a JSON body out. Routing is left to the embedding
//! server; everything protocol-level lives in `proxyprobe_client`.

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod handler;
pub mod redact;
pub mod request;
pub mod response;

pub use handler::{handle, handle_query};
pub use redact::redact_proxy;
pub use request::CheckRequest;
pub use response::{ApiResponse, CheckData, ResponseBody};

// Re-export important types from client package
pub use proxyprobe_client::{
    CheckerConfig, ConfigurationError, Error, Kind, ProxyChecker, Timings, VerificationResult,
};
