//! Basic authentication utilities for `Proxy-Authorization`

use base64::Engine;
use base64::prelude::BASE64_STANDARD;

pub const PROXY_AUTHORIZATION: &str = "Proxy-Authorization";

/// Encode `username:password` as base64
pub fn encode_basic_auth(username: &str, password: &str) -> String {
    let credentials = format!("{username}:{password}");
    BASE64_STANDARD.encode(credentials.as_bytes())
}

/// Build the complete `Proxy-Authorization: Basic …` header line, without CRLF.
pub fn proxy_authorization_line(username: &str, password: &str) -> String {
    format!(
        "{PROXY_AUTHORIZATION}: Basic {}",
        encode_basic_auth(username, password)
    )
}

/// Decode basic authentication credentials
///
/// Accepts either the bare base64 token or a full header line / value with
/// the `Basic ` scheme prefix.
pub fn decode_basic_auth(encoded: &str) -> crate::Result<(String, String)> {
    let token = encoded
        .rsplit_once("Basic ")
        .map_or(encoded, |(_, token)| token)
        .trim();

    let decoded = BASE64_STANDARD
        .decode(token)
        .map_err(|_| crate::error::invalid_proxy("Invalid base64 encoding in authorization header"))?;

    let credentials = String::from_utf8(decoded)
        .map_err(|_| crate::error::invalid_proxy("Invalid UTF-8 in authorization header"))?;

    let (username, password) = credentials
        .split_once(':')
        .ok_or_else(|| crate::error::invalid_proxy("Invalid format in authorization header"))?;

    Ok((username.to_string(), password.to_string()))
}
