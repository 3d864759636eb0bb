//! TCP socket configuration utilities

use tokio::net::TcpStream;

/// Configure the proxy socket. Requests are small and written in one go, so
/// Nagle only adds latency to the timings.
pub fn configure_tcp_socket(stream: &TcpStream, nodelay: bool) -> crate::Result<()> {
    if nodelay {
        stream
            .set_nodelay(true)
            .map_err(|e| crate::error::network(format!("Failed to set TCP_NODELAY: {e}")))?;
    }
    Ok(())
}
