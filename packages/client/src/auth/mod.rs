//! Proxy authentication

pub mod basic_auth;

pub use basic_auth::{PROXY_AUTHORIZATION, decode_basic_auth, encode_basic_auth, proxy_authorization_line};
