//! Status line and header block parsing

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use regex::Regex;

static STATUS_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^HTTP/\d(?:\.\d)?\s+(\d{3})(?:\s+(.*))?$").expect("static status pattern is valid")
});

/// Parsed status line and headers of one response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    /// 0 when the status line was not recognisable
    pub status_code: u16,
    pub status_text: String,
    /// Lower-cased names, trimmed values, last occurrence wins
    pub headers: HashMap<String, String>,
}

impl ResponseHead {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name.to_ascii_lowercase().as_str())
            .map(String::as_str)
    }
}

/// Decode a raw header block.
///
/// Never fails: an unrecognised status line yields status 0 and the caller
/// decides what that means.
pub fn parse_status_and_headers(raw: &[u8]) -> ResponseHead {
    let text = String::from_utf8_lossy(raw);
    let mut lines = text.split("\r\n").filter(|line| !line.is_empty());

    let (status_code, status_text) = lines
        .next()
        .and_then(|line| STATUS_LINE.captures(line))
        .and_then(|caps| {
            let code = caps.get(1)?.as_str().parse::<u16>().ok()?;
            let reason = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
            Some((code, reason))
        })
        .unwrap_or_default();

    let mut headers = HashMap::new();
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    ResponseHead {
        status_code,
        status_text,
        headers,
    }
}
