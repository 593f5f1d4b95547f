//! Shared test helpers: synthetic responders and hex decoding
#![allow(dead_code)]

use std::net::SocketAddr;
use std::num::ParseIntError;
use std::sync::Mutex;
use std::time::Duration;

use ntp_fingerprint_lib::{Probe, ProbeCatalog, ProbeId, ProbeOutcome, ProbeSender};
use tokio::net::UdpSocket;
use tokio::time::sleep;

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Decode a lowercase or uppercase hex string
pub fn unhex(s: &str) -> Result<Vec<u8>, ParseIntError> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i.saturating_add(2).min(s.len())], 16))
        .collect()
}

/// In-memory responder answering a fixed set of probes
#[derive(Debug, Default)]
pub struct ScriptedSender {
    replies: Vec<ProbeId>,
    reversed_delays: bool,
    sent: Mutex<Vec<ProbeId>>,
}

impl ScriptedSender {
    pub fn replying_to(ids: &[ProbeId]) -> Self {
        Self { replies: ids.to_vec(), ..Self::default() }
    }

    pub fn silent() -> Self {
        Self::default()
    }

    /// Reply to probe `i` when `bits[i]` is non-zero
    pub fn from_bits(bits: &[u8]) -> Self {
        let replies = ProbeId::ALL
            .iter()
            .zip(bits)
            .filter(|(_, bit)| **bit != 0)
            .map(|(id, _)| *id)
            .collect();
        Self { replies, ..Self::default() }
    }

    /// Later probes answer sooner, so tasks complete in reverse catalog order
    pub fn with_reversed_delays(mut self) -> Self {
        self.reversed_delays = true;
        self
    }

    fn record(&self, id: ProbeId) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(id);
        }
    }

    /// Probes received so far, in arrival order
    pub fn sent(&self) -> Vec<ProbeId> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

impl ProbeSender for ScriptedSender {
    async fn send(&self, probe: &Probe, _target: SocketAddr) -> ProbeOutcome {
        self.record(probe.id());
        if self.reversed_delays {
            let remaining = ProbeId::ALL.len().saturating_sub(probe.id().index()) as u64;
            sleep(Duration::from_millis(remaining.saturating_mul(10))).await;
        }
        ProbeOutcome::from(self.replies.contains(&probe.id()))
    }
}

/// Bind a UDP responder on localhost that answers only the given probes.
///
/// Incoming datagrams are identified by comparing them with the catalog
/// payloads; anything unrecognised is ignored.
pub async fn spawn_udp_responder(reply_to: Vec<ProbeId>) -> TestResult<SocketAddr> {
    let socket = UdpSocket::bind("127.0.0.1:0").await?;
    let addr = socket.local_addr()?;
    tokio::spawn(async move {
        let mut buf = [0u8; 2048];
        loop {
            let Ok((n, peer)) = socket.recv_from(&mut buf).await else {
                continue;
            };
            let probe = ProbeCatalog::standard()
                .iter()
                .find(|probe| probe.payload()[..] == buf[..n]);
            if let Some(probe) = probe {
                if reply_to.contains(&probe.id()) {
                    let _ = socket.send_to(b"\x24\x02\x03\xe8", peer).await;
                }
            }
        }
    });
    Ok(addr)
}
