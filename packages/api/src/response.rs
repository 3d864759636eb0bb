//! Outgoing responses

use http::StatusCode;
use serde::{Deserialize, Serialize};

use proxyprobe_client::VerificationResult;

/// Outcome data for a request that got as far as checking the proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckData {
    pub proxy: String,
    pub working: bool,
    pub target_url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub external_ip: Option<String>,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status_text: Option<String>,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub connect_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tunnel_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tls_ms: Option<u64>,
    pub bytes_read: usize,
    pub note: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl CheckData {
    pub fn from_result(proxy: &str, result: &VerificationResult) -> Self {
        let timings = result.timings();
        Self {
            proxy: proxy.to_string(),
            working: result.working(),
            target_url: result.target_url().to_string(),
            external_ip: result.external_ip().map(str::to_string),
            status_code: result.status_code(),
            status_text: result.status_text().map(str::to_string),
            latency_ms: timings.total_ms(),
            connect_ms: timings.connect_ms(),
            tunnel_ms: timings.tunnel_ms(),
            tls_ms: timings.tls_ms(),
            bytes_read: result.bytes_read(),
            note: result.note().to_string(),
            error: result.error().map(str::to_string),
        }
    }
}

/// `{ ok, data }` on success, `{ ok: false, error }` on a rejected request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBody {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<CheckData>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

/// Status code and body for the embedding router to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
}

impl ApiResponse {
    /// 200 with check data; a proxy that does not work is still a 200
    pub fn ok(data: CheckData) -> Self {
        Self {
            status: StatusCode::OK,
            body: ResponseBody {
                ok: true,
                data: Some(data),
                error: None,
            },
        }
    }

    /// 400 for requests that never reached the network
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ResponseBody {
                ok: false,
                data: None,
                error: Some(error.into()),
            },
        }
    }

    /// # Errors
    ///
    /// Propagates `serde_json` serialization failures.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.body)
    }

    /// # Errors
    ///
    /// Propagates `serde_json` serialization failures.
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(&self.body)
    }
}
