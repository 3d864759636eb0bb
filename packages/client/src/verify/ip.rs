//! External IP extraction from a probe response body

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static IPV4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,3}(?:\.\d{1,3}){3})\b").expect("static ipv4 pattern is valid")
});

/// Best-effort IP the target saw the request coming from.
///
/// JSON bodies with a string `ip` or `origin` field win; otherwise the first
/// IPv4-shaped substring is used.
pub fn extract_external_ip(body_preview: &str) -> Option<String> {
    let text = body_preview.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        let from_json = ["ip", "origin"].iter().find_map(|key| match map.get(*key) {
            Some(Value::String(value)) if !value.trim().is_empty() => Some(value.trim().to_string()),
            _ => None,
        });
        if from_json.is_some() {
            return from_json;
        }
    }

    IPV4.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_ip_field() {
        assert_eq!(extract_external_ip(r#"{"ip":"9.9.9.9"}"#).as_deref(), Some("9.9.9.9"));
    }

    #[test]
    fn test_json_origin_field() {
        assert_eq!(
            extract_external_ip(r#"{"origin": " 203.0.113.7 "}"#).as_deref(),
            Some("203.0.113.7")
        );
    }

    #[test]
    fn test_ip_preferred_over_origin() {
        assert_eq!(
            extract_external_ip(r#"{"origin":"1.1.1.1","ip":"2.2.2.2"}"#).as_deref(),
            Some("2.2.2.2")
        );
    }

    #[test]
    fn test_plain_text_body() {
        assert_eq!(extract_external_ip("198.51.100.23\n").as_deref(), Some("198.51.100.23"));
    }

    #[test]
    fn test_json_without_fields_falls_back_to_pattern() {
        assert_eq!(
            extract_external_ip(r#"{"address":"10.0.0.1"}"#).as_deref(),
            Some("10.0.0.1")
        );
    }

    #[test]
    fn test_non_string_ip_is_ignored() {
        assert_eq!(extract_external_ip(r#"{"ip":12}"#), None);
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(extract_external_ip("<html>hello</html>"), None);
        assert_eq!(extract_external_ip("   "), None);
    }
}
