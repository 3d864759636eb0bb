//! Timed connection layer
//!
//! One TCP connection per attempt, opened under a connect deadline, with
//! deadline-bounded writes and the CONNECT tunnel handshake on top.

pub mod deadline;
pub mod tcp;

pub use deadline::Deadline;
pub use tcp::{
    configure_tcp_socket, connect_to_proxy, read_connect_response, send_connect_request, write_all_by,
};
