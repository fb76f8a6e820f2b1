//! Fixture support for the tlg integration tests and benches.
//!
//! [`StreamBuilder`] assembles encoded record streams — including chunks
//! with real compression and correct (or deliberately wrong) checksums —
//! so the tests can exercise the lexer against byte sequences a writer
//! would produce. It is test scaffolding, not a product encoder: the
//! workspace's write path is a non-goal.

use std::io::Write;

use tlg_decoder::{DecodeError, Lexer, LexerOptions, TokenKind};
use tlg_wire::chunk::Compression;
use tlg_wire::magic::MAGIC;
use tlg_wire::record::opcode;

/// Builds an encoded byte stream record by record.
///
/// ```
/// use tlg_tests::StreamBuilder;
/// use tlg_wire::record::opcode;
///
/// let bytes = StreamBuilder::new()
///     .record(opcode::HEADER, b"hello")
///     .record(opcode::FOOTER, b"")
///     .finish();
/// ```
pub struct StreamBuilder {
    out: Vec<u8>,
}

impl StreamBuilder {
    /// Start a stream with the magic prefix.
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: MAGIC.to_vec(),
        }
    }

    /// Start a stream with no magic prefix (for `skip_magic` scenarios).
    #[must_use]
    pub fn without_magic() -> Self {
        Self { out: Vec::new() }
    }

    /// Append one framed record: opcode, little-endian length, payload.
    #[must_use]
    pub fn record(mut self, opcode: u8, payload: &[u8]) -> Self {
        self.out.push(opcode);
        self.out
            .extend_from_slice(&(payload.len() as u64).to_le_bytes());
        self.out.extend_from_slice(payload);
        self
    }

    /// Append a chunk record batching `records`, compressed as requested,
    /// with a correct CRC32-IEEE over the uncompressed content.
    #[must_use]
    pub fn chunk(self, compression: Compression, records: &[(u8, &[u8])]) -> Self {
        let content = encode_records(records);
        let crc = crc32fast::hash(&content);
        self.chunk_raw(compression, &content, crc)
    }

    /// Like [`chunk`](Self::chunk), but with a caller-supplied checksum,
    /// for corruption scenarios.
    #[must_use]
    pub fn chunk_with_crc(
        self,
        compression: Compression,
        records: &[(u8, &[u8])],
        crc: u32,
    ) -> Self {
        let content = encode_records(records);
        self.chunk_raw(compression, &content, crc)
    }

    /// Append a chunk whose uncompressed content is `content` verbatim —
    /// the content may be a deliberately malformed record sequence.
    #[must_use]
    pub fn chunk_raw(mut self, compression: Compression, content: &[u8], crc: u32) -> Self {
        let compressed = compress(compression, content);
        let name = compression.name().as_bytes();

        let mut payload = Vec::new();
        payload.extend_from_slice(&0u64.to_le_bytes()); // start time
        payload.extend_from_slice(&0u64.to_le_bytes()); // end time
        payload.extend_from_slice(&(content.len() as u64).to_le_bytes());
        payload.extend_from_slice(&crc.to_le_bytes());
        payload.extend_from_slice(&(name.len() as u32).to_le_bytes());
        payload.extend_from_slice(name);
        payload.extend_from_slice(&(compressed.len() as u64).to_le_bytes());
        payload.extend_from_slice(&compressed);

        self = self.record(opcode::CHUNK, &payload);
        self
    }

    /// Append arbitrary bytes verbatim.
    #[must_use]
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.out.extend_from_slice(bytes);
        self
    }

    /// Drop the final `n` bytes, producing a truncated stream.
    #[must_use]
    pub fn truncate_by(mut self, n: usize) -> Self {
        let keep = self.out.len().saturating_sub(n);
        self.out.truncate(keep);
        self
    }

    /// The finished byte stream.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.out
    }
}

impl Default for StreamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Frame a record sequence the way it appears inside a chunk.
#[must_use]
pub fn encode_records(records: &[(u8, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    for (opcode, payload) in records {
        out.push(*opcode);
        out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
        out.extend_from_slice(payload);
    }
    out
}

fn compress(compression: Compression, content: &[u8]) -> Vec<u8> {
    match compression {
        Compression::None => content.to_vec(),
        Compression::Lz4 => {
            let mut enc = lz4_flex::frame::FrameEncoder::new(Vec::new());
            enc.write_all(content).expect("writing to a Vec");
            enc.finish().expect("finishing an lz4 frame into a Vec")
        }
        Compression::Zstd => zstd::encode_all(content, 0).expect("zstd encoding into a Vec"),
    }
}

/// Lex a whole stream into owned `(kind, payload)` pairs.
///
/// # Errors
///
/// Propagates the lexer's error along with however many tokens were
/// decoded before it, so tests can assert on both.
pub fn collect_tokens(
    bytes: Vec<u8>,
    options: LexerOptions,
) -> Result<Vec<(TokenKind, Vec<u8>)>, (Vec<(TokenKind, Vec<u8>)>, DecodeError)> {
    let mut lexer = match Lexer::with_options(std::io::Cursor::new(bytes), options) {
        Ok(lexer) => lexer,
        Err(e) => return Err((Vec::new(), e)),
    };
    let mut tokens = Vec::new();
    let mut buf = Vec::new();
    loop {
        match lexer.next_token(&mut buf) {
            Ok(Some((kind, payload))) => tokens.push((kind, payload.to_vec())),
            Ok(None) => return Ok(tokens),
            Err(e) => return Err((tokens, e)),
        }
    }
}
