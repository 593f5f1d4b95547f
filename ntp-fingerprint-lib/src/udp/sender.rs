use std::fmt::Write as _;
use std::future::Future;
use std::io::{self, Write as _};
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::net::UdpSocket;
use tracing::{debug, warn};

use crate::probe::{Probe, ProbeOutcome};

/// Replies larger than this are truncated; only their presence matters
pub const RECV_BUF_LEN: usize = 1024;

/// One probe exchange against a resolved target.
///
/// Implementations never fail: anything short of a reply is
/// [`ProbeOutcome::Silent`].
pub trait ProbeSender: Send + Sync + 'static {
    fn send(&self, probe: &Probe, target: SocketAddr)
        -> impl Future<Output = ProbeOutcome> + Send;
}

/// Observational output produced per probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceMode {
    /// One `.` on stderr per probe
    Progress,
    /// Hex dump of every datagram sent and received, as `debug` events
    Bytes,
    Quiet,
}

/// Sends each probe from a fresh ephemeral UDP socket
#[derive(Debug, Clone)]
pub struct UdpProbeSender {
    timeout: Duration,
    trace: TraceMode,
}

impl UdpProbeSender {
    pub fn new(timeout: Duration, trace: TraceMode) -> Self {
        Self { timeout, trace }
    }

    /// `Ok(None)` when the timeout elapses without a datagram
    async fn exchange(
        &self,
        payload: &[u8],
        target: SocketAddr,
    ) -> io::Result<Option<(Vec<u8>, SocketAddr)>> {
        let sock = UdpSocket::bind(bind_addr_for(&target)).await?;
        sock.send_to(payload, target).await?;

        let mut buf = [0u8; RECV_BUF_LEN];
        match tokio::time::timeout(self.timeout, sock.recv_from(&mut buf)).await {
            Ok(Ok((n, from))) => Ok(Some((buf[..n].to_vec(), from))),
            Ok(Err(e)) => Err(e),
            Err(_) => Ok(None),
        }
    }

    fn trace_sent(&self, probe: &Probe, target: SocketAddr) {
        match self.trace {
            TraceMode::Bytes => {
                debug!(probe = %probe.id(), %target, "> {}", hex(probe.payload()));
            }
            TraceMode::Progress => {
                let mut stderr = io::stderr().lock();
                let _ = stderr.write_all(b".");
                let _ = stderr.flush();
            }
            TraceMode::Quiet => {}
        }
    }
}

impl ProbeSender for UdpProbeSender {
    async fn send(&self, probe: &Probe, target: SocketAddr) -> ProbeOutcome {
        self.trace_sent(probe, target);
        let started = Instant::now();

        match self.exchange(probe.payload(), target).await {
            Ok(Some((reply, from))) => {
                if self.trace == TraceMode::Bytes {
                    debug!(
                        probe = %probe.id(),
                        %from,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "< {}",
                        hex(&reply)
                    );
                }
                ProbeOutcome::Reply
            }
            Ok(None) => {
                if self.trace == TraceMode::Bytes {
                    debug!(probe = %probe.id(), "< none");
                }
                ProbeOutcome::Silent
            }
            Err(e) => {
                warn!(probe = %probe.id(), %target, error = %e, "probe exchange failed; counting as no reply");
                ProbeOutcome::Silent
            }
        }
    }
}

/// Unspecified local address of the same family as `target`, port 0
pub fn bind_addr_for(target: &SocketAddr) -> SocketAddr {
    match target {
        SocketAddr::V4(_) => SocketAddr::from(([0, 0, 0, 0], 0)),
        SocketAddr::V6(_) => SocketAddr::from(([0u16; 8], 0)),
    }
}

pub fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().saturating_mul(2));
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}
