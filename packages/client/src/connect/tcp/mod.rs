//! TCP connection utilities
//!
//! Proxy connect with a deadline, socket configuration, deadline-bounded
//! writes, and the HTTP CONNECT handshake.

pub mod basic_connection;
pub mod http_connect;
pub mod io;
pub mod socket_config;

pub use basic_connection::connect_to_proxy;
pub use http_connect::{read_connect_response, send_connect_request};
pub use io::write_all_by;
pub use socket_config::configure_tcp_socket;
