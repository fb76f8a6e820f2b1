//! Chunk loading: swaps the lexer's active source when a chunk record is
//! entered, and restores it when the chunk's content is exhausted.

use std::io::{self, Read, Take};
use std::mem;

use lz4_flex::frame::FrameDecoder;
use zstd::stream::read::Decoder as ZstdDecoder;

use tlg_wire::chunk::{ChunkPrelude, Compression};
use tlg_wire::scalars::get_u64_le;

use crate::decoders::{Source, active_reader, drain_bounded};
use crate::error::DecodeError;
use crate::lexer::Lexer;

impl<R: Read> Lexer<R> {
    /// Enter a chunk record: parse its header, bound the stream to the
    /// compressed content, and install the matching decoder as the
    /// active source.
    ///
    /// The caller has already consumed the chunk's 9-byte record prefix;
    /// the source is positioned at the start of the chunk payload.
    pub(crate) fn enter_chunk(&mut self) -> Result<(), DecodeError> {
        if self.in_chunk {
            return Err(DecodeError::NestedChunk);
        }

        // Fixed prelude: start time, end time, and uncompressed length
        // are skipped positionally — a sequential reader detects the end
        // of the chunk by exhaustion, not by byte accounting.
        let mut prelude_buf = [0u8; ChunkPrelude::SIZE];
        self.read_exact_active(&mut prelude_buf)
            .map_err(|source| DecodeError::ChunkHeader {
                what: "header fields",
                source,
            })?;
        let prelude = ChunkPrelude::parse(&prelude_buf)?;

        // Compression name plus the 8-byte compressed-content length.
        // Copied incrementally so a forged name length cannot force a
        // giant up-front allocation.
        let meta_len = u64::from(prelude.compression_len) + 8;
        self.meta_buf.clear();
        {
            let reader = active_reader(&mut self.source, &mut self.replay)?;
            let copied = io::copy(&mut reader.take(meta_len), &mut self.meta_buf).map_err(
                |source| DecodeError::ChunkHeader {
                    what: "compression metadata",
                    source,
                },
            )?;
            if copied < meta_len {
                return Err(DecodeError::ChunkHeader {
                    what: "compression metadata",
                    source: io::ErrorKind::UnexpectedEof.into(),
                });
            }
        }
        let name_len = prelude.compression_len as usize;
        let compression = Compression::from_name(&self.meta_buf[..name_len])?;
        let (content_len, _) = get_u64_le(&self.meta_buf, name_len)?;

        let stream = match mem::replace(&mut self.source, Source::Detached) {
            Source::Stream(r) => r,
            _ => unreachable!("chunk entry happens at top level only"),
        };
        let bounded = stream.take(content_len);

        if self.validate_crc {
            self.install_validated(bounded, compression, prelude.uncompressed_crc)?;
        } else {
            self.install_lazy(bounded, compression)?;
        }
        self.in_chunk = true;
        Ok(())
    }

    /// Lazy path: the decompressor itself becomes the active source and
    /// records are decoded as their bytes become available.
    fn install_lazy(
        &mut self,
        bounded: Take<R>,
        compression: Compression,
    ) -> Result<(), DecodeError> {
        self.source = match compression {
            Compression::None => Source::Raw(bounded),
            Compression::Lz4 => Source::Lz4(FrameDecoder::new(bounded)),
            Compression::Zstd => Source::Zstd(ZstdDecoder::new(bounded)?),
        };
        Ok(())
    }

    /// Validated path: fully materialize the decompressed content, check
    /// its CRC32-IEEE, and only then serve records — from the replay
    /// buffer, so nothing inside a corrupt chunk is ever observed.
    fn install_validated(
        &mut self,
        bounded: Take<R>,
        compression: Compression,
        expected: u32,
    ) -> Result<(), DecodeError> {
        let content = self.replay.begin_fill();
        let stream = match compression {
            Compression::None => {
                let mut bounded = bounded;
                bounded.read_to_end(content)?;
                bounded.into_inner()
            }
            Compression::Lz4 => {
                let mut dec = FrameDecoder::new(bounded);
                dec.read_to_end(content)?;
                drain_bounded(dec.into_inner())?
            }
            Compression::Zstd => {
                let mut dec = ZstdDecoder::new(bounded)?;
                dec.read_to_end(content)?;
                drain_bounded(dec.finish().into_inner())?
            }
        };

        let computed = crc32fast::hash(&content[..]);
        if computed != expected {
            return Err(DecodeError::CrcMismatch { expected, computed });
        }
        self.source = Source::Replay(stream);
        Ok(())
    }

    /// Leave the current chunk: detach its source completely and resume
    /// the outer stream.
    pub(crate) fn exit_chunk(&mut self) -> Result<(), DecodeError> {
        let source = mem::replace(&mut self.source, Source::Detached);
        self.source = Source::Stream(source.into_stream()?);
        self.in_chunk = false;
        Ok(())
    }
}
