//! # Proxy check from the command line
//!
//! ```text
//! cargo run --example check_proxy -- user:pass@203.0.113.10:3128 [https://api.ipify.org?format=json]
//! ```
//!
//! Set `RUST_LOG=proxyprobe_client=debug` to watch each phase.

use proxyprobe::{CheckRequest, CheckerConfig, ProxyChecker, handle};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(proxy) = args.next() else {
        eprintln!("usage: check_proxy <proxy> [url]");
        std::process::exit(2);
    };

    let mut request = CheckRequest::new(proxy);
    if let Some(url) = args.next() {
        request = request.with_url(url);
    }

    let checker = ProxyChecker::new(CheckerConfig::default())?;
    let response = handle(&checker, &request).await;

    println!("{} {}", response.status.as_u16(), response.to_json()?);
    Ok(())
}
