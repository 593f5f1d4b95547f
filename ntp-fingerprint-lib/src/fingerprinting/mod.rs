pub mod matcher;
pub mod signatures;

pub use matcher::Identification;
pub use signatures::{FingerprintTable, Signature, UNREACHABLE};
