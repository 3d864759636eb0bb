//! Verification results

use serde::Serialize;

use crate::endpoint::TargetDescriptor;
use crate::error::{Error, Kind};
use crate::http::RawResponse;

use super::timeline::Timings;

pub const NOTE_WORKING: &str = "Proxy is working";
pub const NOTE_NOT_PASSED: &str = "Proxy did not pass the check";
pub const NOTE_FAILED: &str = "Proxy check failed";

/// Outcome of verifying one proxy, built once and never changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    working: bool,
    target_url: String,
    status_code: u16,
    status_text: Option<String>,
    external_ip: Option<String>,
    timings: Timings,
    bytes_read: usize,
    note: String,
    error: Option<String>,
    #[serde(skip)]
    error_kind: Option<Kind>,
}

impl VerificationResult {
    /// The attempt completed an HTTP exchange with the target.
    pub(crate) fn from_exchange(
        target: &TargetDescriptor,
        response: &RawResponse,
        external_ip: Option<String>,
        timings: Timings,
    ) -> Self {
        let working = response.is_success();
        Self {
            working,
            target_url: target.to_string(),
            status_code: response.status_code,
            status_text: Some(response.status_text.clone()).filter(|t| !t.is_empty()),
            external_ip,
            timings,
            bytes_read: response.bytes_read,
            note: if working { NOTE_WORKING } else { NOTE_NOT_PASSED }.to_string(),
            error: None,
            error_kind: None,
        }
    }

    /// The attempt stopped before a complete exchange.
    pub(crate) fn from_error(target: &TargetDescriptor, error: &Error, timings: Timings) -> Self {
        let (status_code, status_text, note) = match error.connect_status() {
            Some((status, reason)) => {
                let text = if reason.is_empty() { "CONNECT failed" } else { reason };
                (status, Some(text.to_string()), NOTE_NOT_PASSED)
            }
            None => (0, None, NOTE_FAILED),
        };

        Self {
            working: false,
            target_url: target.to_string(),
            status_code,
            status_text,
            external_ip: None,
            timings,
            bytes_read: 0,
            note: note.to_string(),
            error: Some(error.to_string()),
            error_kind: Some(error.kind().clone()),
        }
    }

    pub(crate) fn no_targets() -> Self {
        Self {
            working: false,
            target_url: String::new(),
            status_code: 0,
            status_text: None,
            external_ip: None,
            timings: Timings::default(),
            bytes_read: 0,
            note: NOTE_FAILED.to_string(),
            error: Some("no target urls to probe".to_string()),
            error_kind: None,
        }
    }

    pub fn working(&self) -> bool {
        self.working
    }

    /// URL of the attempt this result describes
    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// Final status seen, the CONNECT status when the tunnel was refused, 0 otherwise
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status_text.as_deref()
    }

    pub fn external_ip(&self) -> Option<&str> {
        self.external_ip.as_deref()
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Kind of the error that ended the attempt, if one did
    pub fn error_kind(&self) -> Option<&Kind> {
        self.error_kind.as_ref()
    }
}
