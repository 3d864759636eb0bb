//! # ProxyProbe engine
//!
//! Verifies HTTP(S) forward proxies by speaking to them over raw TCP: it
//! hand-builds HTTP/1.1 requests, frames responses from the byte stream
//! under hard caps, and upgrades CONNECT tunnels to TLS with full
//! certificate validation.
//!
//! ## Features
//!
//! - **Absolute-form GET** through the proxy for `http://` targets
//! - **CONNECT + TLS** for `https://` targets, hostname-bound
//! - **Per-phase deadlines** on connect, every read/write, and the handshake
//! - **Bounded buffers** for header blocks and bodies
//! - **Probe fallback** over a short list of "echo my IP" URLs
//!
//! ## Usage
//!
//! ```no_run
//! use proxyprobe_client::{CheckerConfig, ProxyChecker};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let checker = ProxyChecker::new(CheckerConfig::default())?;
//! let result = checker.verify("user:pass@203.0.113.10:3128", None).await?;
//!
//! println!("working: {}", result.working());
//! if let Some(ip) = result.external_ip() {
//!     println!("exit ip: {ip}");
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod auth;
pub mod config;
pub mod connect;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod prelude;
pub mod tls;
pub mod verify;

pub use config::{CheckerConfig, ConfigurationError};
pub use endpoint::{ProxyDescriptor, Scheme, TargetDescriptor};
pub use error::{Error, Kind, Result};
pub use verify::{ProxyChecker, Timings, VerificationResult};

pub use url::Url;
