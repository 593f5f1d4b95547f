#![forbid(unsafe_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::ProbeConfig;
use crate::error::Result;
use crate::fingerprinting::FingerprintTable;
use crate::probe::{ProbeCatalog, ResponseVector};
use crate::udp::{resolve_target, ProbeSender, TargetHost, TraceMode, UdpProbeSender};

mod builder;

pub use builder::build_vector;

/// Immutable settings for one fingerprinting run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub target: TargetHost,
    pub port: u16,
    pub timeout: Duration,
    pub concurrency: usize,
    pub trace: TraceMode,
}

impl ScanConfig {
    pub fn new(target: TargetHost, probe: &ProbeConfig, trace: TraceMode) -> Self {
        Self {
            target,
            port: probe.port,
            timeout: probe.timeout(),
            concurrency: probe.concurrency,
            trace,
        }
    }

    /// UDP sender carrying this run's timeout and trace mode
    pub fn udp_sender(&self) -> UdpProbeSender {
        UdpProbeSender::new(self.timeout, self.trace)
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub target: TargetHost,
    pub address: SocketAddr,
    pub vector: ResponseVector,
    /// Name of the first matching signature
    pub identified: Option<String>,
}

impl Report {
    pub fn is_identified(&self) -> bool {
        self.identified.is_some()
    }
}

/// Resolve the target, probe it with the full catalog and match the result.
///
/// Resolution happens before any probe is sent; a failure there returns
/// without invoking `sender`.
pub async fn run<S: ProbeSender>(
    config: &ScanConfig,
    sender: Arc<S>,
    table: &FingerprintTable,
) -> Result<Report> {
    let address = resolve_target(&config.target, config.port).await?;
    let catalog = ProbeCatalog::standard();
    debug!(
        target = %config.target,
        %address,
        probes = catalog.len(),
        timeout_secs = config.timeout.as_secs(),
        concurrency = config.concurrency,
        "probing target"
    );

    let vector = build_vector(catalog, sender, address, config.concurrency).await?;
    let identified = table.identify(&vector).name().map(str::to_owned);
    debug!(%vector, replies = vector.replies(), identified = ?identified, "probing finished");

    Ok(Report { target: config.target.clone(), address, vector, identified })
}
