use std::fmt;
use std::str::FromStr;

/// Stable label for every probe in the catalog.
///
/// The declaration order is the column order of the response vector and of
/// every positional signature. New probes are appended at the end; existing
/// variants are never reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProbeId {
    /// Well-formed NTPv4 client request
    Basic = 0,
    /// Client request missing the last transmit timestamp byte
    Short,
    /// Zeroed request followed by a 20 byte authenticator of zeros
    BrokenAuthLen,
    /// Mode 5 (broadcast)
    Broadcast,
    /// Mode 1 (symmetric active)
    SymmetricActive,
    /// Mode 7 (reserved for private use)
    ReservedMode,
    /// Undefined protocol version 7
    Version7,
    /// Protocol version 0
    Version0,
    /// Client request with every timestamp zeroed
    AllZero,
    /// Extension field declaring a 0xffff byte length
    BadExtensionLength,
    /// Extension field with type 0x0000
    ExtensionType0,
    /// Extension field with type 0x0404
    ExtensionType0404,
    /// NTPv3 request carrying a type 0x0000 extension field
    Version3Extension,
}

impl ProbeId {
    /// Every probe, in catalog order.
    pub const ALL: [ProbeId; 13] = [
        ProbeId::Basic,
        ProbeId::Short,
        ProbeId::BrokenAuthLen,
        ProbeId::Broadcast,
        ProbeId::SymmetricActive,
        ProbeId::ReservedMode,
        ProbeId::Version7,
        ProbeId::Version0,
        ProbeId::AllZero,
        ProbeId::BadExtensionLength,
        ProbeId::ExtensionType0,
        ProbeId::ExtensionType0404,
        ProbeId::Version3Extension,
    ];

    /// Column of this probe in a response vector
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            ProbeId::Basic => "basic",
            ProbeId::Short => "short",
            ProbeId::BrokenAuthLen => "broken_auth_len",
            ProbeId::Broadcast => "broadcast",
            ProbeId::SymmetricActive => "symmetric_active",
            ProbeId::ReservedMode => "reserved_mode",
            ProbeId::Version7 => "version7",
            ProbeId::Version0 => "version0",
            ProbeId::AllZero => "all_zero",
            ProbeId::BadExtensionLength => "bad_extension_length",
            ProbeId::ExtensionType0 => "extension_type0",
            ProbeId::ExtensionType0404 => "extension_type0404",
            ProbeId::Version3Extension => "version3_extension",
        }
    }
}

impl fmt::Display for ProbeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProbeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProbeId::ALL
            .iter()
            .copied()
            .find(|id| id.name() == s)
            .ok_or_else(|| format!("unknown probe: {s}"))
    }
}
