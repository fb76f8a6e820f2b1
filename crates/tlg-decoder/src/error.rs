use tlg_wire::WireError;

/// Errors that can occur while lexing a record stream.
///
/// Every variant is fatal: the lexer makes no attempt to resynchronize,
/// and a caller that wants to retry must re-establish the byte source and
/// build a fresh lexer. No token is ever returned alongside an error.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── BadMagic                  ← stream does not start with the magic prefix
///   ├── NestedChunk               ← chunk record inside another chunk
///   ├── ZeroOpcode                ← reserved 0x00 kind tag on the wire
///   ├── ChunkHeader               ← truncated/failed read of chunk metadata
///   ├── CrcMismatch               ← validated chunk failed its integrity check
///   ├── RecordTooLarge            ← declared length exceeds addressable memory
///   ├── Wire(WireError)           ← from tlg-wire field parsing
///   └── Io(std::io::Error)        ← from the underlying byte source
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The stream does not begin with the magic prefix.
    ///
    /// Also covers a stream too short to hold the prefix at all — either
    /// way, this is not a tlg stream.
    #[error("not a tlg stream: bad magic prefix")]
    BadMagic,

    /// A chunk record was encountered while already reading chunk
    /// content. Chunks batch top-level records and must never contain
    /// other chunks.
    #[error("detected nested chunk")]
    NestedChunk,

    /// A record carried the reserved 0x00 opcode.
    ///
    /// Unknown nonzero opcodes are skipped for forward compatibility;
    /// zero is permanently invalid and means the stream is corrupt or
    /// misframed.
    #[error("invalid zero opcode")]
    ZeroOpcode,

    /// The chunk header or its compression metadata could not be read.
    ///
    /// `what` names the field group being read when the source failed,
    /// since a truncated chunk header can fail at several positions.
    #[error("failed to read chunk {what}")]
    ChunkHeader {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A validated chunk's decompressed content did not match its
    /// declared checksum. Reported before any record from the chunk is
    /// handed to the caller.
    #[error("chunk crc mismatch: expected {expected:#010x}, computed {computed:#010x}")]
    CrcMismatch { expected: u32, computed: u32 },

    /// A record declared a length that cannot be represented in memory
    /// on this platform.
    #[error("record length {len} exceeds addressable memory")]
    RecordTooLarge { len: u64 },

    /// A field-level parsing error from `tlg-wire`.
    ///
    /// Surfaces truncated chunk prelude fields and unsupported
    /// compression names.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// An I/O error from the underlying byte source or a decompressor.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
