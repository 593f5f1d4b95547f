#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod fingerprinting;
pub mod probe;
pub mod scan;
pub mod telemetry;
pub mod udp;

pub use config::{load_from_path, Config, ProbeConfig};
pub use error::{FingerprintError, Result};
pub use fingerprinting::{FingerprintTable, Identification, Signature};
pub use probe::{Probe, ProbeCatalog, ProbeId, ProbeOutcome, ResponseVector};
pub use scan::{build_vector, run, Report, ScanConfig};
pub use udp::{ProbeSender, TargetHost, TraceMode, UdpProbeSender};
