//! Request handling

use proxyprobe_client::ProxyChecker;

use crate::redact::redact_proxy;
use crate::request::CheckRequest;
use crate::response::{ApiResponse, CheckData};

pub const MISSING_PROXY: &str = "Missing proxy parameter";

/// Check the proxy named by `request`.
///
/// Missing or malformed input gives a 400. Once the input is valid, every
/// outcome (including a proxy that times out or refuses) is a 200 whose data
/// says `working: false`.
pub async fn handle(checker: &ProxyChecker, request: &CheckRequest) -> ApiResponse {
    let Some(proxy) = request.proxy() else {
        return ApiResponse::bad_request(MISSING_PROXY);
    };

    let echoed = redact_proxy(proxy);
    log::debug!("Checking proxy {} (url: {:?})", echoed, request.url());

    match checker.verify(proxy, request.url()).await {
        Ok(result) => {
            log::debug!(
                "Proxy {} working={} status={}",
                echoed,
                result.working(),
                result.status_code()
            );
            ApiResponse::ok(CheckData::from_result(&echoed, &result))
        }
        Err(e) => {
            log::debug!("Rejected check for {}: {}", echoed, e);
            ApiResponse::bad_request(e.to_string())
        }
    }
}

/// [`handle`] for a raw query string
pub async fn handle_query(checker: &ProxyChecker, query: &str) -> ApiResponse {
    handle(checker, &CheckRequest::from_query(query)).await
}
