use bytes::Bytes;
use std::sync::LazyLock;

use super::id::ProbeId;
use super::template::{Body, ExtensionField, Mode, ProbeTemplate, Trailer};

static STANDARD: LazyLock<ProbeCatalog> = LazyLock::new(ProbeCatalog::build);

impl ProbeId {
    /// Packet recipe behind this probe
    pub const fn template(self) -> ProbeTemplate {
        let client = ProbeTemplate::client();
        match self {
            ProbeId::Basic => client,
            ProbeId::Short => client.truncated(47),
            ProbeId::BrokenAuthLen => client
                .with_body(Body::ZeroTransmit)
                .with_trailer(Trailer::Authenticator(20)),
            ProbeId::Broadcast => client.with_mode(Mode::Broadcast),
            ProbeId::SymmetricActive => client.with_mode(Mode::SymmetricActive),
            ProbeId::ReservedMode => client.with_mode(Mode::Reserved),
            ProbeId::Version7 => client.with_version(7),
            ProbeId::Version0 => client.with_version(0),
            ProbeId::AllZero => client.with_body(Body::ZeroTransmit),
            ProbeId::BadExtensionLength => {
                client.with_trailer(Trailer::Extension(ExtensionField::new(0x0404, 0xffff)))
            }
            ProbeId::ExtensionType0 => {
                client.with_trailer(Trailer::Extension(ExtensionField::well_formed(0x0000)))
            }
            ProbeId::ExtensionType0404 => {
                client.with_trailer(Trailer::Extension(ExtensionField::well_formed(0x0404)))
            }
            ProbeId::Version3Extension => client
                .with_version(3)
                .with_trailer(Trailer::Extension(ExtensionField::well_formed(0x0000))),
        }
    }
}

/// One crafted datagram, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    id: ProbeId,
    payload: Bytes,
}

impl Probe {
    pub fn new(id: ProbeId) -> Self {
        Self { id, payload: id.template().build() }
    }

    pub fn id(&self) -> ProbeId {
        self.id
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }
}

/// Ordered, read-only list of every probe.
///
/// Position `i` always holds `ProbeId::ALL[i]`, so catalog order and
/// response vector columns cannot drift apart.
#[derive(Debug)]
pub struct ProbeCatalog {
    probes: Vec<Probe>,
}

impl ProbeCatalog {
    /// Process-wide catalog, built on first use
    pub fn standard() -> &'static ProbeCatalog {
        &STANDARD
    }

    fn build() -> Self {
        Self { probes: ProbeId::ALL.iter().copied().map(Probe::new).collect() }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Probe> {
        self.probes.iter()
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    pub fn get(&self, id: ProbeId) -> Option<&Probe> {
        self.probes.get(id.index())
    }
}

impl<'a> IntoIterator for &'a ProbeCatalog {
    type Item = &'a Probe;
    type IntoIter = std::slice::Iter<'a, Probe>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
