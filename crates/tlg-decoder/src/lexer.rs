use std::io::{self, Read};

use tlg_wire::magic;
use tlg_wire::record::{PREFIX_SIZE, RecordPrefix, opcode};

use crate::decoders::{ReplayBuffer, Source, active_reader};
use crate::error::DecodeError;
use crate::token::TokenKind;

/// Construction-time options for a [`Lexer`].
///
/// All flags default to off, which gives the safest general-purpose
/// configuration short of checksum validation: the magic prefix is
/// required and chunks are transparently expanded without CRC checks.
#[derive(Clone, Copy, Debug, Default)]
pub struct LexerOptions {
    /// Do not require (or consume) the leading magic prefix. For byte
    /// sources that have already been positioned past it, or fragments
    /// captured mid-stream.
    pub skip_magic: bool,

    /// Verify each chunk's CRC32-IEEE before emitting any record from
    /// it. This forces the whole chunk to be decompressed into memory up
    /// front, trading the lazy path's streaming behavior for integrity.
    pub validate_crc: bool,

    /// Return chunk records to the caller as opaque [`TokenKind::Chunk`]
    /// tokens instead of transparently expanding their contents. For
    /// tooling that rewrites or indexes chunks wholesale.
    pub emit_chunks: bool,
}

/// Streaming lexer for a tlg record stream.
///
/// Pulls records one at a time off any [`Read`] source, transparently
/// expanding compressed chunks so that chunked and unchunked streams
/// yield the same token sequence:
///
/// ```text
/// ┌───────────────────────────────────────────────────────────┐
/// │ Lexer                                                     │
/// │   source: Stream | Raw | Lz4 | Zstd | Replay  ← one live  │
/// │   replay: ReplayBuffer   ← validated chunks, slot reused  │
/// │   in_chunk: bool         ← chunks must not nest           │
/// └───────────────────────────────────────────────────────────┘
/// ```
///
/// The lexer is strictly single-pass and synchronous: no seeking, no
/// internal threading, no buffering beyond one record's payload and one
/// chunk's header fields (plus, with validation on, one chunk's
/// decompressed content). Dropping it is the only cancellation.
///
/// # Example
///
/// ```no_run
/// use std::fs::File;
/// use std::io::BufReader;
/// use tlg_decoder::Lexer;
///
/// # fn main() -> Result<(), tlg_decoder::DecodeError> {
/// let file = BufReader::new(File::open("flight.tlg").expect("open"));
/// let mut lexer = Lexer::new(file)?;
/// let mut buf = Vec::new();
/// while let Some((kind, payload)) = lexer.next_token(&mut buf)? {
///     println!("{kind}: {} bytes", payload.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Lexer<R: Read> {
    pub(crate) source: Source<R>,
    pub(crate) replay: ReplayBuffer,
    /// Scratch for a chunk's compression name and content length.
    pub(crate) meta_buf: Vec<u8>,
    pub(crate) in_chunk: bool,
    pub(crate) validate_crc: bool,
    emit_chunks: bool,
}

impl<R: Read> Lexer<R> {
    /// Create a lexer with default options, consuming and checking the
    /// magic prefix.
    ///
    /// # Errors
    ///
    /// [`DecodeError::BadMagic`] if the stream is shorter than the magic
    /// prefix or does not begin with it.
    pub fn new(reader: R) -> Result<Self, DecodeError> {
        Self::with_options(reader, LexerOptions::default())
    }

    /// Create a lexer with the given options.
    ///
    /// Unless [`LexerOptions::skip_magic`] is set, the magic prefix is
    /// consumed from `reader` here; framing starts at the current
    /// position otherwise.
    ///
    /// # Errors
    ///
    /// [`DecodeError::BadMagic`] as for [`new`](Self::new).
    pub fn with_options(mut reader: R, options: LexerOptions) -> Result<Self, DecodeError> {
        if !options.skip_magic {
            let mut prefix = [0u8; magic::MAGIC_SIZE];
            if reader.read_exact(&mut prefix).is_err() || !magic::starts_with_magic(&prefix) {
                return Err(DecodeError::BadMagic);
            }
        }
        Ok(Self {
            source: Source::Stream(reader),
            replay: ReplayBuffer::new(),
            meta_buf: Vec::new(),
            in_chunk: false,
            validate_crc: options.validate_crc,
            emit_chunks: options.emit_chunks,
        })
    }

    /// Decode the next record.
    ///
    /// Returns `Ok(Some((kind, payload)))` for each record, and
    /// `Ok(None)` as the definitive end-of-stream signal. The payload
    /// slice is borrowed from `buf`: it is valid only until the next
    /// call, and callers that retain payloads must copy them out. `buf`
    /// is grown when a record's declared length exceeds its capacity and
    /// is never shrunk, so a long run of similarly sized records decodes
    /// without allocating.
    ///
    /// Records with unrecognized nonzero opcodes are skipped silently so
    /// that streams written by newer writers remain readable. A zero
    /// opcode is always a fatal [`DecodeError::ZeroOpcode`].
    ///
    /// Chunk content that ends cleanly between records resumes the outer
    /// stream transparently. A chunk truncated *mid-prefix* is
    /// indistinguishable from that clean boundary and is also resumed
    /// silently — an inherited compatibility behavior that can mask the
    /// loss of a damaged chunk's tail. Truncation anywhere else
    /// (mid-payload, or inside a chunk header) is fatal.
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`]; all errors are fatal and the lexer should be
    /// discarded afterwards. No token is ever returned alongside an
    /// error.
    pub fn next_token<'a>(
        &mut self,
        buf: &'a mut Vec<u8>,
    ) -> Result<Option<(TokenKind, &'a [u8])>, DecodeError> {
        let (kind, len) = loop {
            let mut prefix = [0u8; PREFIX_SIZE];
            match self.read_exact_active(&mut prefix) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    // Exhaustion while reading a prefix. Inside a chunk
                    // this is how the end of the chunk's record sequence
                    // is detected; at top level it is the end of the
                    // stream. Both clean and truncated exhaustion land
                    // here on purpose.
                    if self.in_chunk {
                        self.exit_chunk()?;
                        continue;
                    }
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            }
            let prefix = RecordPrefix::from_bytes(&prefix);

            if prefix.opcode == opcode::CHUNK && !self.emit_chunks {
                self.enter_chunk()?;
                continue;
            }

            let len = usize::try_from(prefix.len)
                .map_err(|_| DecodeError::RecordTooLarge { len: prefix.len })?;
            self.read_payload(buf, prefix.len)?;

            match TokenKind::from_opcode(prefix.opcode) {
                Some(kind) => break (kind, len),
                None if prefix.opcode == 0 => return Err(DecodeError::ZeroOpcode),
                None => {} // future record kind: skip it and keep going
            }
        };
        Ok(Some((kind, &buf[..len])))
    }

    /// Read exactly `out.len()` bytes from the active source.
    pub(crate) fn read_exact_active(&mut self, out: &mut [u8]) -> io::Result<()> {
        let reader = active_reader(&mut self.source, &mut self.replay)?;
        reader.read_exact(out)
    }

    /// Read a record's declared payload into the reusable buffer.
    ///
    /// The declared length is not trusted for pre-allocation: bytes are
    /// copied incrementally through a bounded view, so a forged length
    /// hits the truncation error below instead of a giant `reserve`.
    fn read_payload(&mut self, buf: &mut Vec<u8>, len: u64) -> Result<(), DecodeError> {
        buf.clear();
        let reader = active_reader(&mut self.source, &mut self.replay)?;
        let copied = io::copy(&mut reader.take(len), buf)?;
        if copied < len {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        Ok(())
    }
}
