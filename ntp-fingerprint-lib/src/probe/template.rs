//! Declarative NTP packet templates.
//!
//! Every probe shares the same 48 byte header layout:
//!
//! ```text
//! offset  0: LI | VN | Mode     u8
//! offset  1: stratum            u8   (0)
//! offset  2: poll               u8   (3)
//! offset  3: precision          i8   (0xfa)
//! offset  4: root delay         u32  (0x00010000)
//! offset  8: root dispersion    u32  (0x00010000)
//! offset 12: reference id       u32  (0)
//! offset 16: reference ts       u64  (0)
//! offset 24: origin ts          u64  (0)
//! offset 32: receive ts         u64  (0)
//! offset 40: transmit ts        u64  (placeholder or 0)
//! ```
//!
//! Probes vary the leading byte, zero the transmit timestamp, append a
//! trailer or truncate the result.

use bytes::{BufMut, Bytes, BytesMut};

/// Length of the fixed NTP header
pub const HEADER_LEN: usize = 48;

/// Size of every extension field block appended by a probe (4 byte
/// type/length prefix + 28 bytes of filler).
pub const EXTENSION_BLOCK_LEN: usize = 32;

const STRATUM: u8 = 0;
const POLL: u8 = 3;
const PRECISION: u8 = 0xfa;
const ROOT_DELAY: u32 = 0x0001_0000;
const ROOT_DISPERSION: u32 = 0x0001_0000;
const TRANSMIT_PLACEHOLDER: u64 = 0xec04_cd98_f547_2b45;

/// Leap indicator 3: clock unsynchronized
const LEAP_UNSYNCHRONIZED: u8 = 3;

/// Association mode carried in the low three bits of the leading byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SymmetricActive = 1,
    Client = 3,
    Broadcast = 5,
    Reserved = 7,
}

/// Pack leap indicator, version and mode into the leading header byte.
pub const fn leading_byte(leap: u8, version: u8, mode: Mode) -> u8 {
    ((leap & 0x03) << 6) | ((version & 0x07) << 3) | (mode as u8 & 0x07)
}

/// Contents of the header after the leading byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {
    /// Static header fields with the transmit timestamp placeholder
    Standard,
    /// Static header fields with a zero transmit timestamp
    ZeroTransmit,
}

/// Bytes appended after the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trailer {
    None,
    /// Zero-filled authenticator (key id + digest) of the given length
    Authenticator(usize),
    Extension(ExtensionField),
}

/// Extension field block: `(type, declared length)` prefix followed by zero
/// filler up to [`EXTENSION_BLOCK_LEN`].
///
/// `declared_len` is written as-is and may disagree with the real block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionField {
    pub field_type: u16,
    pub declared_len: u16,
}

impl ExtensionField {
    pub const fn new(field_type: u16, declared_len: u16) -> Self {
        Self { field_type, declared_len }
    }

    /// Field whose declared length matches the block size
    pub const fn well_formed(field_type: u16) -> Self {
        Self::new(field_type, EXTENSION_BLOCK_LEN as u16)
    }

    fn write(&self, buf: &mut BytesMut) {
        buf.put_u16(self.field_type);
        buf.put_u16(self.declared_len);
        buf.put_bytes(0, EXTENSION_BLOCK_LEN.saturating_sub(4));
    }
}

/// Recipe for one probe payload.
///
/// Starts from an NTPv4 client request (`0xe3` leading byte) and applies
/// named overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTemplate {
    pub leap: u8,
    pub version: u8,
    pub mode: Mode,
    pub body: Body,
    pub trailer: Trailer,
    pub truncate_to: Option<usize>,
}

impl ProbeTemplate {
    pub const fn client() -> Self {
        Self {
            leap: LEAP_UNSYNCHRONIZED,
            version: 4,
            mode: Mode::Client,
            body: Body::Standard,
            trailer: Trailer::None,
            truncate_to: None,
        }
    }

    pub const fn with_version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    pub const fn with_trailer(mut self, trailer: Trailer) -> Self {
        self.trailer = trailer;
        self
    }

    pub const fn truncated(mut self, len: usize) -> Self {
        self.truncate_to = Some(len);
        self
    }

    /// Final payload length without building it
    pub fn len(&self) -> usize {
        let full = HEADER_LEN.saturating_add(match self.trailer {
            Trailer::None => 0,
            Trailer::Authenticator(len) => len,
            Trailer::Extension(_) => EXTENSION_BLOCK_LEN,
        });
        self.truncate_to.map_or(full, |len| len.min(full))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn build(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.len().max(HEADER_LEN));
        buf.put_u8(leading_byte(self.leap, self.version, self.mode));
        buf.put_u8(STRATUM);
        buf.put_u8(POLL);
        buf.put_u8(PRECISION);
        buf.put_u32(ROOT_DELAY);
        buf.put_u32(ROOT_DISPERSION);
        buf.put_u32(0); // reference id
        buf.put_u64(0); // reference timestamp
        buf.put_u64(0); // origin timestamp
        buf.put_u64(0); // receive timestamp
        buf.put_u64(match self.body {
            Body::Standard => TRANSMIT_PLACEHOLDER,
            Body::ZeroTransmit => 0,
        });

        match self.trailer {
            Trailer::None => {}
            Trailer::Authenticator(len) => buf.put_bytes(0, len),
            Trailer::Extension(field) => field.write(&mut buf),
        }

        if let Some(len) = self.truncate_to {
            buf.truncate(len);
        }
        buf.freeze()
    }
}
