//! Basic TCP connection establishment
//!
//! Opens the single TCP connection an attempt uses, bounded by the connect
//! budget. Name resolution counts against the same budget.

use std::time::Duration;

use tokio::net::TcpStream;

use super::socket_config::configure_tcp_socket;
use crate::connect::Deadline;
use crate::endpoint::ProxyDescriptor;
use crate::error;

/// Connect to the proxy, failing with `ConnectTimeout` once `budget` elapses.
pub async fn connect_to_proxy(proxy: &ProxyDescriptor, budget: Duration) -> crate::Result<TcpStream> {
    let deadline = Deadline::after(budget);

    let stream = match deadline
        .run(TcpStream::connect((proxy.host(), proxy.port())))
        .await
    {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            tracing::debug!("Failed to connect to proxy {}: {}", proxy, e);
            return Err(error::network(format!("Proxy TCP error: {e}")));
        }
        Err(_) => {
            tracing::debug!("Connect to proxy {} timed out after {:?}", proxy, budget);
            return Err(error::connect_timeout());
        }
    };

    configure_tcp_socket(&stream, true)?;
    Ok(stream)
}
