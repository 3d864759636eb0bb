//! Attempt timing
//!
//! Instants are recorded as each architecturally significant step finishes;
//! intervals are derived from them with saturating arithmetic, so no
//! interval is ever negative and every interval fits inside the total.

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

/// Instants recorded during one attempt
#[derive(Debug, Clone, Copy)]
pub struct Timeline {
    start: Instant,
    connected: Option<Instant>,
    connect_answered: Option<Instant>,
    tls_established: Option<Instant>,
    finished: Option<Instant>,
}

impl Timeline {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            connected: None,
            connect_answered: None,
            tls_established: None,
            finished: None,
        }
    }

    pub fn mark_connected(&mut self) {
        self.connected = Some(Instant::now());
    }

    /// The proxy replied to CONNECT, whatever the status
    pub fn mark_connect_answered(&mut self) {
        self.connect_answered = Some(Instant::now());
    }

    pub fn mark_tls_established(&mut self) {
        self.tls_established = Some(Instant::now());
    }

    /// Last byte of the final response has been read
    pub fn mark_finished(&mut self) {
        self.finished = Some(Instant::now());
    }

    /// Intervals so far; an unfinished attempt is measured up to now
    pub fn timings(&self) -> Timings {
        let end = self.finished.unwrap_or_else(Instant::now);
        let since = |later: Option<Instant>, earlier: Option<Instant>| {
            Some(later?.saturating_duration_since(earlier?))
        };

        Timings {
            connect: since(self.connected, Some(self.start)),
            tunnel: since(self.connect_answered, self.connected),
            tls: since(self.tls_established, self.connect_answered),
            total: end.saturating_duration_since(self.start),
        }
    }
}

/// Intervals between the recorded instants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Timings {
    /// Start to TCP connect
    pub connect: Option<Duration>,
    /// TCP connect to the proxy's CONNECT reply
    pub tunnel: Option<Duration>,
    /// CONNECT reply to TLS handshake done
    pub tls: Option<Duration>,
    /// Start to the last byte read
    pub total: Duration,
}

impl Timings {
    pub fn connect_ms(&self) -> Option<u64> {
        self.connect.map(millis)
    }

    pub fn tunnel_ms(&self) -> Option<u64> {
        self.tunnel.map(millis)
    }

    pub fn tls_ms(&self) -> Option<u64> {
        self.tls.map(millis)
    }

    pub fn total_ms(&self) -> u64 {
        millis(self.total)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
