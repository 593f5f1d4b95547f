use std::fmt;

use super::id::ProbeId;

/// Whether a probe elicited any datagram before its timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeOutcome {
    Reply,
    Silent,
}

impl ProbeOutcome {
    pub fn is_reply(self) -> bool {
        matches!(self, ProbeOutcome::Reply)
    }

    /// `1` for a reply, `0` otherwise
    pub fn bit(self) -> u8 {
        u8::from(self.is_reply())
    }
}

impl From<bool> for ProbeOutcome {
    fn from(replied: bool) -> Self {
        if replied {
            ProbeOutcome::Reply
        } else {
            ProbeOutcome::Silent
        }
    }
}

impl From<ProbeOutcome> for bool {
    fn from(outcome: ProbeOutcome) -> Self {
        outcome.is_reply()
    }
}

/// Outcomes of one run, indexed like the probe catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseVector {
    outcomes: Vec<ProbeOutcome>,
}

impl ResponseVector {
    pub fn new(outcomes: Vec<ProbeOutcome>) -> Self {
        Self { outcomes }
    }

    /// Build from `0`/`1` columns; any non-zero value counts as a reply.
    pub fn from_bits(bits: &[u8]) -> Self {
        Self { outcomes: bits.iter().map(|b| ProbeOutcome::from(*b != 0)).collect() }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcome recorded for `id`, or `None` if the vector is too short.
    pub fn get(&self, id: ProbeId) -> Option<ProbeOutcome> {
        self.outcomes.get(id.index()).copied()
    }

    pub fn bits(&self) -> Vec<u8> {
        self.outcomes.iter().map(|o| o.bit()).collect()
    }

    pub fn replies(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_reply()).count()
    }
}

impl fmt::Display for ResponseVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, outcome) in self.outcomes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", outcome.bit())?;
        }
        f.write_str("]")
    }
}
