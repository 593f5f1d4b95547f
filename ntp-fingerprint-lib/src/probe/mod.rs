pub mod catalog;
pub mod id;
pub mod outcome;
pub mod template;

pub use catalog::{Probe, ProbeCatalog};
pub use id::ProbeId;
pub use outcome::{ProbeOutcome, ResponseVector};
pub use template::{Body, ExtensionField, Mode, ProbeTemplate, Trailer};
