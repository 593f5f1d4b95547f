mod loader;
pub mod types;
mod validator;

pub use loader::load_from_path;
pub use types::{Config, LoggingConfig, ProbeConfig, SignatureConfig};
pub use validator::{validate, MAX_CONCURRENCY};
