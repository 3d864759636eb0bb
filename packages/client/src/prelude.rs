//! ProxyProbe prelude
//!
//! The types most callers need to verify a proxy.

pub use crate::config::{CheckerConfig, ConfigurationError, TlsConfig};
pub use crate::endpoint::{ProxyDescriptor, Scheme, TargetDescriptor};
pub use crate::error::{Error, Kind, Result};
pub use crate::verify::{ProxyChecker, Timings, VerificationResult};
