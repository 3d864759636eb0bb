//! One probe attempt: a single connection driven through the state machine

use tokio::net::TcpStream;

use super::checker::ProxyChecker;
use super::ip::extract_external_ip;
use super::timeline::Timeline;
use crate::connect::{Deadline, connect_to_proxy, read_connect_response, send_connect_request, write_all_by};
use crate::endpoint::{ProxyDescriptor, TargetDescriptor};
use crate::http::{RawResponse, build_plain_request, build_tunneled_request, read_response};

/// States one attempt moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    Idle,
    ConnectingToProxy,
    SendingPlainRequest,
    SendingConnect,
    ReadingProxyResponse,
    TlsHandshake,
    SendingTargetRequest,
    ReadingTargetResponse,
    ExtractingIp,
    Done,
}

/// A completed exchange with the target
pub(crate) struct Exchange {
    pub response: RawResponse,
    pub external_ip: Option<String>,
}

pub(crate) struct Attempt<'a> {
    checker: &'a ProxyChecker,
    proxy: &'a ProxyDescriptor,
    target: &'a TargetDescriptor,
    timeline: Timeline,
    state: ProbeState,
}

impl<'a> Attempt<'a> {
    pub fn new(checker: &'a ProxyChecker, proxy: &'a ProxyDescriptor, target: &'a TargetDescriptor) -> Self {
        Self {
            checker,
            proxy,
            target,
            timeline: Timeline::start(),
            state: ProbeState::Idle,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn state(&self) -> ProbeState {
        self.state
    }

    /// Run the attempt. Every socket and TLS session opened here is owned by
    /// this call and dropped before it returns, on success and failure alike.
    pub async fn run(&mut self) -> crate::Result<Exchange> {
        let checker = self.checker;
        let config = checker.config();

        self.transition(ProbeState::ConnectingToProxy);
        let stream = connect_to_proxy(self.proxy, config.connect_timeout).await?;
        self.timeline.mark_connected();

        let response = if self.target.is_https() {
            self.run_tunneled(stream).await?
        } else {
            self.run_plain(stream).await?
        };
        self.timeline.mark_finished();

        self.transition(ProbeState::ExtractingIp);
        let external_ip = extract_external_ip(&response.preview(config.preview_chars));

        self.transition(ProbeState::Done);
        Ok(Exchange { response, external_ip })
    }

    async fn run_plain(&mut self, mut stream: TcpStream) -> crate::Result<RawResponse> {
        let checker = self.checker;
        let config = checker.config();

        self.transition(ProbeState::SendingPlainRequest);
        let request = build_plain_request(self.proxy, self.target, &config.user_agent);
        write_all_by(&mut stream, request.as_bytes(), Deadline::after(config.read_timeout)).await?;

        self.transition(ProbeState::ReadingProxyResponse);
        read_response(&mut stream, &checker.response_limits()).await
    }

    async fn run_tunneled(&mut self, mut stream: TcpStream) -> crate::Result<RawResponse> {
        let checker = self.checker;
        let config = checker.config();

        self.transition(ProbeState::SendingConnect);
        send_connect_request(&mut stream, self.proxy, self.target, Deadline::after(config.read_timeout)).await?;

        self.transition(ProbeState::ReadingProxyResponse);
        let reply =
            read_connect_response(&mut stream, config.max_header_bytes, Deadline::after(config.read_timeout))
                .await;
        match reply {
            Ok(_) => self.timeline.mark_connect_answered(),
            // A refusal is still a full round-trip with the proxy.
            Err(e) if e.connect_status().is_some() => {
                self.timeline.mark_connect_answered();
                return Err(e);
            }
            Err(e) => return Err(e),
        }

        self.transition(ProbeState::TlsHandshake);
        let mut tls_stream = checker
            .tls()
            .upgrade(stream, self.target.host(), config.tls_timeout)
            .await?;
        self.timeline.mark_tls_established();

        self.transition(ProbeState::SendingTargetRequest);
        let request = build_tunneled_request(self.target, &config.user_agent);
        write_all_by(&mut tls_stream, request.as_bytes(), Deadline::after(config.read_timeout)).await?;

        self.transition(ProbeState::ReadingTargetResponse);
        read_response(&mut tls_stream, &checker.response_limits()).await
    }

    fn transition(&mut self, next: ProbeState) {
        tracing::trace!(
            proxy = %self.proxy,
            target = %self.target,
            "probe state {:?} -> {:?}",
            self.state,
            next
        );
        self.state = next;
    }
}
