//! Credential redaction for echoed proxy strings

/// Replace the password in `user:pass@host:port` style strings with `***`.
///
/// Strings without credentials come back trimmed but otherwise untouched.
pub fn redact_proxy(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(at) = trimmed.rfind('@') else {
        return trimmed.to_string();
    };

    let (prefix, host_part) = trimmed.split_at(at);
    let userinfo_start = prefix.find("://").map_or(0, |idx| idx + 3);

    match prefix[userinfo_start..].split_once(':') {
        Some((user, _)) => format!("{}{user}:***{host_part}", &prefix[..userinfo_start]),
        None => trimmed.to_string(),
    }
}
