use thiserror::Error;

/// Errors that abort a fingerprinting run
///
/// Probe timeouts and transient socket errors are not represented here: they
/// degrade to a silent outcome for that probe and the run continues.
#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Cannot resolve host: {host} ({reason})")]
    Resolve { host: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Probe worker failed: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, FingerprintError>;
