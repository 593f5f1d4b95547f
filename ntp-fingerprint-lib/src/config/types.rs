use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Probe exchange configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Seconds to wait for a reply to each probe
    /// Default: 2
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Destination UDP port
    /// Default: 123
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of probes in flight at once
    /// 1 sends the catalog strictly one probe after another
    /// Default: 1
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            port: default_port(),
            concurrency: default_concurrency(),
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    /// Can be overridden at runtime via RUST_LOG environment variable
    /// Default: "info"
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Show module path (target) in log messages
    /// Default: false
    #[serde(default)]
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), show_target: false }
    }
}

/// Additional signature declared in the configuration file
///
/// Keys of `expect` are probe names (`basic`, `short`, ...); values state
/// whether the implementation answers that probe. Probes not listed are
/// ignored when matching.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SignatureConfig {
    pub name: String,
    #[serde(default)]
    pub expect: BTreeMap<String, bool>,
}

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Probe exchange settings
    #[serde(default)]
    pub probe: ProbeConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Signatures appended after the built-in table
    /// Built-in entries always keep priority
    /// Default: empty
    #[serde(default)]
    pub signatures: Vec<SignatureConfig>,
}

fn default_timeout_secs() -> u64 {
    2
}

fn default_port() -> u16 {
    123
}

fn default_concurrency() -> usize {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}
