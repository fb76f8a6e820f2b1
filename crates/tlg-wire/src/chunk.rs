use crate::error::WireError;
use crate::scalars::{get_u32_le, get_u64_le};

/// Compression applied to a chunk's record content.
///
/// The wire carries the algorithm as a length-prefixed name so new
/// algorithms can be introduced without renumbering; readers reject any
/// name they don't implement rather than guessing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    /// Records are stored as-is (empty name on the wire).
    None,
    /// LZ4 frame format.
    Lz4,
    /// Zstandard frame format.
    Zstd,
}

impl Compression {
    /// Parse a compression name as it appears on the wire.
    ///
    /// The input is raw bytes, not a `str` — a corrupt stream can put
    /// anything here, and a non-UTF-8 name is just another unsupported
    /// name, reported lossily.
    ///
    /// # Errors
    ///
    /// [`WireError::UnsupportedCompression`] for any name other than
    /// `""`, `"lz4"`, or `"zstd"`.
    pub fn from_name(name: &[u8]) -> Result<Self, WireError> {
        match name {
            b"" => Ok(Self::None),
            b"lz4" => Ok(Self::Lz4),
            b"zstd" => Ok(Self::Zstd),
            other => Err(WireError::UnsupportedCompression {
                name: String::from_utf8_lossy(other).into_owned(),
            }),
        }
    }

    /// The canonical wire name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Lz4 => "lz4",
            Self::Zstd => "zstd",
        }
    }
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Chunk prelude — the fixed-width fields at the front of a chunk
/// record's payload, ahead of the variable-length compression name.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────────┐
/// │ Offset │ Size    │ Description                      │
/// ├────────┼─────────┼──────────────────────────────────┤
/// │ 0x00   │ 8 bytes │ Start time (ns)                  │
/// │ 0x08   │ 8 bytes │ End time (ns)                    │
/// │ 0x10   │ 8 bytes │ Uncompressed content length      │
/// │ 0x18   │ 4 bytes │ CRC32-IEEE of uncompressed bytes │
/// │ 0x1C   │ 4 bytes │ Compression name length          │
/// └────────┴─────────┴──────────────────────────────────┘
/// ```
///
/// After the prelude come `compression_len` name bytes, then an 8-byte
/// compressed-content length, then the content itself. A sequential
/// reader only consumes the CRC and the name length; the time range and
/// uncompressed length exist for index builders and are skipped
/// positionally here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkPrelude {
    pub start_time: u64,
    pub end_time: u64,
    pub uncompressed_len: u64,
    pub uncompressed_crc: u32,
    pub compression_len: u32,
}

impl ChunkPrelude {
    /// Total prelude size in bytes (fixed).
    pub const SIZE: usize = 32;

    /// Parse a prelude from the first [`Self::SIZE`] bytes of `buf`.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if `buf` is shorter than the prelude.
    pub fn parse(buf: &[u8]) -> Result<Self, WireError> {
        let (start_time, offset) = get_u64_le(buf, 0)?;
        let (end_time, offset) = get_u64_le(buf, offset)?;
        let (uncompressed_len, offset) = get_u64_le(buf, offset)?;
        let (uncompressed_crc, offset) = get_u32_le(buf, offset)?;
        let (compression_len, _) = get_u32_le(buf, offset)?;

        Ok(Self {
            start_time,
            end_time,
            uncompressed_len,
            uncompressed_crc,
            compression_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_prelude(p: &ChunkPrelude) -> Vec<u8> {
        let mut buf = Vec::with_capacity(ChunkPrelude::SIZE);
        buf.extend_from_slice(&p.start_time.to_le_bytes());
        buf.extend_from_slice(&p.end_time.to_le_bytes());
        buf.extend_from_slice(&p.uncompressed_len.to_le_bytes());
        buf.extend_from_slice(&p.uncompressed_crc.to_le_bytes());
        buf.extend_from_slice(&p.compression_len.to_le_bytes());
        buf
    }

    #[test]
    fn roundtrip_prelude() {
        let prelude = ChunkPrelude {
            start_time: 1_000_000,
            end_time: 2_000_000,
            uncompressed_len: 4096,
            uncompressed_crc: 0xDEAD_BEEF,
            compression_len: 4,
        };
        let bytes = encode_prelude(&prelude);
        assert_eq!(bytes.len(), ChunkPrelude::SIZE);
        assert_eq!(ChunkPrelude::parse(&bytes).unwrap(), prelude);
    }

    #[test]
    fn parse_ignores_trailing_bytes() {
        let prelude = ChunkPrelude {
            start_time: 0,
            end_time: 0,
            uncompressed_len: 10,
            uncompressed_crc: 7,
            compression_len: 0,
        };
        let mut bytes = encode_prelude(&prelude);
        bytes.extend_from_slice(b"lz4 name and payload would follow");
        assert_eq!(ChunkPrelude::parse(&bytes).unwrap(), prelude);
    }

    #[test]
    fn truncated_prelude() {
        let bytes = [0u8; ChunkPrelude::SIZE - 1];
        let result = ChunkPrelude::parse(&bytes);
        assert!(matches!(result, Err(WireError::UnexpectedEof { .. })));
    }

    #[test]
    fn compression_known_names() {
        assert_eq!(Compression::from_name(b"").unwrap(), Compression::None);
        assert_eq!(Compression::from_name(b"lz4").unwrap(), Compression::Lz4);
        assert_eq!(Compression::from_name(b"zstd").unwrap(), Compression::Zstd);
    }

    #[test]
    fn compression_rejects_unknown_name() {
        let result = Compression::from_name(b"snappy");
        match result {
            Err(WireError::UnsupportedCompression { name }) => assert_eq!(name, "snappy"),
            other => panic!("expected UnsupportedCompression, got {other:?}"),
        }
    }

    #[test]
    fn compression_rejects_non_utf8_name() {
        let result = Compression::from_name(&[0xFF, 0xFE, b'x']);
        assert!(matches!(
            result,
            Err(WireError::UnsupportedCompression { .. })
        ));
    }

    #[test]
    fn compression_names_roundtrip() {
        for c in [Compression::None, Compression::Lz4, Compression::Zstd] {
            assert_eq!(Compression::from_name(c.name().as_bytes()).unwrap(), c);
            assert_eq!(format!("{c}"), c.name());
        }
    }
}
