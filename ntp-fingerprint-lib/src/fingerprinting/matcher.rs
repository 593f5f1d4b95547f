use tracing::{debug, trace};

use super::signatures::{FingerprintTable, Signature};
use crate::probe::ResponseVector;

/// Result of matching a response vector against a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identification<'a> {
    Identified(&'a Signature),
    /// No signature agreed with the vector
    Unidentified,
}

impl Identification<'_> {
    pub fn name(&self) -> Option<&str> {
        match self {
            Identification::Identified(signature) => Some(signature.name()),
            Identification::Unidentified => None,
        }
    }

    pub fn is_identified(&self) -> bool {
        matches!(self, Identification::Identified(_))
    }
}

impl FingerprintTable {
    /// First signature, in table order, whose expectations all agree with
    /// `vector`.
    pub fn identify(&self, vector: &ResponseVector) -> Identification<'_> {
        for signature in self.iter() {
            if signature.matches(vector) {
                debug!(name = signature.name(), %vector, "signature matched");
                return Identification::Identified(signature);
            }
            trace!(name = signature.name(), "signature rejected");
        }
        debug!(%vector, signatures = self.len(), "no signature matched");
        Identification::Unidentified
    }
}
