//! Wire-frame primitives: constants, checksum, hex/raw conversions and the
//! builder that owns a frame under construction.
//!
//! Every frame shares one layout (0-based indices):
//!
//! ```text
//! +------+-----+------+-------------+------+------+---------+----------+
//! | 0xAA | len | 0xE2 | 6 x 0x00    | type | body | payload | checksum |
//! +------+-----+------+-------------+------+------+---------+----------+
//!    0      1     2      3..=8         9      10     11..      last
//! ```
//!
//! The length byte holds the total frame length including the trailing
//! checksum; the checksum covers everything after the start byte.

/// Frame start byte.
pub(crate) const FRAME_START: u8 = 0xAA;
/// Device/appliance type byte.
pub(crate) const DEVICE_TYPE: u8 = 0xE2;
/// Fixed header length (start byte through the reserved zeros).
pub(crate) const HEADER_LENGTH: usize = 9;

pub(crate) const FRAME_TYPE_CONTROL: u8 = 0x02;
pub(crate) const FRAME_TYPE_QUERY: u8 = 0x03;
pub(crate) const FRAME_TYPE_STATUS_PUSH: u8 = 0x04;

pub(crate) const IDX_LENGTH: usize = 1;
pub(crate) const IDX_FRAME_TYPE: usize = 9;
pub(crate) const IDX_BODY_TYPE: usize = 10;

/// Two's-complement checksum over the inclusive index range:
/// negate the byte sum and keep the low 8 bits.
pub(crate) fn checksum(bytes: &[u8], from: usize, to: usize) -> u8 {
    let sum: u32 = bytes[from..=to].iter().map(|&b| u32::from(b)).sum();
    (sum as u8).wrapping_neg()
}

/// Format bytes as lowercase hex, two digits per byte, no separators.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Parse a hex string into bytes. A trailing unpaired nibble is silently
/// dropped, matching the appliance firmware's tolerance for odd-length
/// payloads; non-hex characters fail the conversion.
pub fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>, hex::FromHexError> {
    if let Some((index, c)) = hex_str
        .char_indices()
        .find(|(_, c)| !c.is_ascii_hexdigit())
    {
        return Err(hex::FromHexError::InvalidHexCharacter { c, index });
    }
    hex::decode(&hex_str[..hex_str.len() & !1])
}

/// Byte sequence to its raw one-char-per-byte string form, the staging
/// representation the surrounding stack passes between layers.
pub fn bytes_to_raw_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Raw one-char-per-byte string back to bytes; chars above 0xFF truncate.
pub fn raw_string_to_bytes(raw: &str) -> Vec<u8> {
    raw.chars().map(|c| c as u32 as u8).collect()
}

/// A frame under construction. All payload writes go through named setters
/// so window clears and bit sets stay explicit operations rather than bare
/// index arithmetic.
#[derive(Debug)]
pub(crate) struct FrameBuilder {
    buf: Vec<u8>,
}

impl FrameBuilder {
    /// Start a frame of the given type with the fixed header in place.
    pub(crate) fn new(frame_type: u8) -> Self {
        let mut buf = vec![0u8; HEADER_LENGTH + 1];
        buf[0] = FRAME_START;
        buf[2] = DEVICE_TYPE;
        buf[IDX_FRAME_TYPE] = frame_type;
        Self { buf }
    }

    fn reserve_to(&mut self, index: usize) {
        if self.buf.len() <= index {
            self.buf.resize(index + 1, 0);
        }
    }

    pub(crate) fn set_byte(&mut self, index: usize, value: u8) {
        self.reserve_to(index);
        self.buf[index] = value;
    }

    pub(crate) fn set_bit(&mut self, index: usize, mask: u8) {
        self.reserve_to(index);
        self.buf[index] |= mask;
    }

    pub(crate) fn clear_bit(&mut self, index: usize, mask: u8) {
        self.reserve_to(index);
        self.buf[index] &= !mask;
    }

    /// Zero the inclusive index window, extending the frame if needed.
    pub(crate) fn clear_window(&mut self, from: usize, to: usize) {
        self.reserve_to(to);
        for byte in &mut self.buf[from..=to] {
            *byte = 0;
        }
    }

    /// Cut the frame down so `last_index` is its final payload byte.
    pub(crate) fn truncate_body(&mut self, last_index: usize) {
        self.buf.truncate(last_index + 1);
    }

    /// Stamp the length byte and append the trailing checksum.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        self.buf[IDX_LENGTH] = (self.buf.len() + 1) as u8;
        let check = checksum(&self.buf, 1, self.buf.len() - 1);
        self.buf.push(check);
        self.buf
    }
}
