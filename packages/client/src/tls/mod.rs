//! TLS over an established CONNECT tunnel
//!
//! Certificate validation is always on: a proxy that tunnels to a host with
//! a bad certificate fails the check rather than being trusted.

pub mod errors;
pub mod tls_manager;

pub use errors::TlsError;
pub use tls_manager::TlsManager;
