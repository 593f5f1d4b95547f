use std::borrow::Cow;
use std::sync::LazyLock;

use crate::probe::{ProbeId, ProbeOutcome, ResponseVector};

static BUILTIN: LazyLock<FingerprintTable> = LazyLock::new(|| {
    FingerprintTable::new(vec![
        Signature::from_prefix("Chrony", &[1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 1, 0, 0]),
        Signature::from_prefix("ntpsec", &[1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0]),
        Signature::from_prefix("openntpd", &[1, 0, 1, 0, 1, 0, 1, 1, 1, 1, 1, 1, 1]),
        Signature::from_prefix("Windows ntp", &[1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0]),
        Signature::from_prefix("ntp-rs", &[1, 0, 1, 1, 1, 1, 0, 0, 1, 0, 1, 1, 0]),
        Signature::from_prefix("ntp.org ntpd", &[1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 1, 1]),
        Signature::from_prefix("rsntp", &[1, 0, 1, 0, 1, 0, 0, 0, 1, 1, 1, 1, 1]),
        Signature::from_prefix(UNREACHABLE, &[0, 0, 0, 0, 0, 0, 0, 0, 0]),
    ])
});

/// Name of the sentinel signature matched by a target that never answers
pub const UNREACHABLE: &str = "an unreachable system";

/// Named set of expected outcomes identifying one implementation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    name: Cow<'static, str>,
    expected: Vec<(ProbeId, ProbeOutcome)>,
}

impl Signature {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        expected: Vec<(ProbeId, ProbeOutcome)>,
    ) -> Self {
        Self { name: name.into(), expected }
    }

    /// Positional signature over the leading probes of `ProbeId::ALL`.
    ///
    /// Columns beyond the known probes are ignored.
    pub fn from_prefix(name: impl Into<Cow<'static, str>>, bits: &[u8]) -> Self {
        let expected = ProbeId::ALL
            .iter()
            .zip(bits)
            .map(|(id, bit)| (*id, ProbeOutcome::from(*bit != 0)))
            .collect();
        Self::new(name, expected)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expected(&self) -> &[(ProbeId, ProbeOutcome)] {
        &self.expected
    }

    /// True when every expectation agrees with the vector.
    ///
    /// Columns the signature does not mention are ignored, so a short
    /// signature matches any longer vector sharing its prefix. A vector too
    /// short to hold an expected column never matches.
    pub fn matches(&self, vector: &ResponseVector) -> bool {
        self.expected
            .iter()
            .all(|(id, expected)| vector.get(*id) == Some(*expected))
    }
}

/// Ordered signature list; earlier entries win ties.
#[derive(Debug, Clone, Default)]
pub struct FingerprintTable {
    signatures: Vec<Signature>,
}

impl FingerprintTable {
    pub fn new(signatures: Vec<Signature>) -> Self {
        Self { signatures }
    }

    /// Known implementations, in priority order
    pub fn builtin() -> &'static FingerprintTable {
        &BUILTIN
    }

    /// Copy of this table with `extra` appended after the existing entries
    pub fn with_extra(&self, extra: impl IntoIterator<Item = Signature>) -> Self {
        let mut signatures = self.signatures.clone();
        signatures.extend(extra);
        Self { signatures }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Signature> {
        self.signatures.iter()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
