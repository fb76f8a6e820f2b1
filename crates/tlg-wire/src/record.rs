/// Known record opcodes.
///
/// These are the kind tags that appear on the wire. 0x00 is reserved as
/// structurally invalid; values outside this table are legal and skipped
/// by readers (forward compatibility).
pub mod opcode {
    pub const HEADER: u8 = 0x01;
    pub const FOOTER: u8 = 0x02;
    pub const SCHEMA: u8 = 0x03;
    pub const CHANNEL: u8 = 0x04;
    pub const MESSAGE: u8 = 0x05;
    pub const CHUNK: u8 = 0x06;
    pub const MESSAGE_INDEX: u8 = 0x07;
    pub const CHUNK_INDEX: u8 = 0x08;
    pub const ATTACHMENT: u8 = 0x09;
    pub const ATTACHMENT_INDEX: u8 = 0x0A;
    pub const STATISTICS: u8 = 0x0B;
    pub const METADATA: u8 = 0x0C;
    pub const METADATA_INDEX: u8 = 0x0D;
    pub const SUMMARY_OFFSET: u8 = 0x0E;
    pub const DATA_END: u8 = 0x0F;
}

/// Size of the fixed record prefix: opcode byte plus length field.
pub const PREFIX_SIZE: usize = 9;

/// Record prefix — the envelope ahead of every record's payload.
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │ opcode   (uint8, 1 byte, 0x00 invalid)           │
/// │ length   (uint64 little-endian, 8 bytes)         │
/// │ payload  [length bytes]                          │
/// └──────────────────────────────────────────────────┘
/// ```
///
/// The prefix itself is always well-formed once 9 bytes are in hand;
/// whether the opcode is meaningful is the reader's decision (zero is
/// rejected, unknown nonzero values are skipped).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordPrefix {
    /// The record's kind tag.
    pub opcode: u8,

    /// Declared payload length in bytes.
    pub len: u64,
}

impl RecordPrefix {
    /// Parse a prefix from exactly [`PREFIX_SIZE`] bytes.
    #[must_use]
    pub fn from_bytes(buf: &[u8; PREFIX_SIZE]) -> Self {
        let len = u64::from_le_bytes(buf[1..9].try_into().expect("slice length is fixed"));
        Self {
            opcode: buf[0],
            len,
        }
    }
}
