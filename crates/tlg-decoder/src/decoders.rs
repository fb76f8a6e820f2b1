use std::io::{self, BufReader, Read, Take};

use lz4_flex::frame::FrameDecoder;
use zstd::stream::read::Decoder as ZstdDecoder;

/// The lexer's active byte source.
///
/// Exactly one variant is live at a time. Top-level records come off
/// `Stream`; entering a chunk moves the stream into a bounded view and
/// wraps it in the decoder matching the chunk's compression tag, and
/// exiting hands the stream back:
///
/// ```text
///   Stream ──chunk──▶ Raw | Lz4 | Zstd | Replay ──exhausted──▶ Stream
/// ```
///
/// `Detached` exists only transiently while a transition rebuilds the
/// source; no read ever observes it between `next_token` calls unless a
/// transition failed fatally first.
pub(crate) enum Source<R: Read> {
    /// Top-level records, straight off the caller's stream.
    Stream(R),
    /// Inside an uncompressed chunk: the stream bounded to the chunk's
    /// content length.
    Raw(Take<R>),
    /// Inside an LZ4 chunk, decompressing lazily as records are pulled.
    Lz4(FrameDecoder<Take<R>>),
    /// Inside a ZSTD chunk, decompressing lazily as records are pulled.
    Zstd(ZstdDecoder<'static, BufReader<Take<R>>>),
    /// Inside a checksum-validated chunk: records replay from the
    /// [`ReplayBuffer`] while the stream is parked here.
    Replay(R),
    /// Transient marker while the source is being rebuilt.
    Detached,
}

impl<R: Read> Source<R> {
    /// Tear down a chunk-scoped source and recover the underlying
    /// stream, skipping whatever remains of the bounded view so the
    /// stream resumes exactly past the chunk content. A decompressor
    /// that stopped short of the declared compressed length (frame
    /// padding, or the silent-truncation case) must not leave stray
    /// bytes for the top-level record loop to misparse.
    pub(crate) fn into_stream(self) -> io::Result<R> {
        match self {
            Self::Stream(r) | Self::Replay(r) => Ok(r),
            Self::Raw(bounded) => drain_bounded(bounded),
            Self::Lz4(dec) => drain_bounded(dec.into_inner()),
            Self::Zstd(dec) => drain_bounded(dec.finish().into_inner()),
            Self::Detached => Err(io::Error::other("byte source detached")),
        }
    }
}

/// Skip the unread remainder of a bounded view and return the stream.
pub(crate) fn drain_bounded<R: Read>(mut bounded: Take<R>) -> io::Result<R> {
    io::copy(&mut bounded, &mut io::sink())?;
    Ok(bounded.into_inner())
}

/// Borrow the currently active reader.
///
/// The replay buffer lives outside the [`Source`] enum so that its
/// allocation survives chunk transitions; this helper reunites the two
/// for the duration of a read.
pub(crate) fn active_reader<'a, R: Read>(
    source: &'a mut Source<R>,
    replay: &'a mut ReplayBuffer,
) -> io::Result<&'a mut dyn Read> {
    Ok(match source {
        Source::Stream(r) => r,
        Source::Raw(bounded) => bounded,
        Source::Lz4(dec) => dec,
        Source::Zstd(dec) => dec,
        Source::Replay(_) => replay,
        Source::Detached => return Err(io::Error::other("byte source detached")),
    })
}

/// Pass-through decoder slot: an in-memory reader over a validated
/// chunk's decompressed content.
///
/// Created once per lexer and rebound in place for each validated chunk —
/// [`begin_fill`](Self::begin_fill) clears the cursor and hands back the
/// backing buffer for refilling, retaining its capacity, so a long run of
/// similarly sized chunks settles into zero steady-state allocation.
pub(crate) struct ReplayBuffer {
    buf: Vec<u8>,
    pos: usize,
}

impl ReplayBuffer {
    pub(crate) fn new() -> Self {
        Self {
            buf: Vec::new(),
            pos: 0,
        }
    }

    /// Rebind the slot for a new chunk: rewind the cursor and return the
    /// cleared backing buffer for the caller to fill.
    pub(crate) fn begin_fill(&mut self) -> &mut Vec<u8> {
        self.pos = 0;
        self.buf.clear();
        &mut self.buf
    }
}

impl Read for ReplayBuffer {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let remaining = &self.buf[self.pos..];
        let n = remaining.len().min(out.len());
        out[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn replay_reads_filled_bytes() {
        let mut replay = ReplayBuffer::new();
        replay.begin_fill().extend_from_slice(b"hello world");

        let mut out = Vec::new();
        replay.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"hello world");

        // Exhausted afterwards.
        let mut more = [0u8; 4];
        assert_eq!(replay.read(&mut more).unwrap(), 0);
    }

    #[test]
    fn replay_rebinds_without_losing_capacity() {
        let mut replay = ReplayBuffer::new();
        replay.begin_fill().extend_from_slice(&[0xAA; 4096]);
        let mut sink = Vec::new();
        replay.read_to_end(&mut sink).unwrap();

        let cap_before = replay.buf.capacity();
        replay.begin_fill().extend_from_slice(&[0xBB; 1024]);
        assert_eq!(replay.buf.capacity(), cap_before);

        let mut out = Vec::new();
        replay.read_to_end(&mut out).unwrap();
        assert_eq!(out, vec![0xBB; 1024]);
    }

    #[test]
    fn replay_partial_reads_advance() {
        let mut replay = ReplayBuffer::new();
        replay.begin_fill().extend_from_slice(b"abcdef");

        let mut chunk = [0u8; 4];
        assert_eq!(replay.read(&mut chunk).unwrap(), 4);
        assert_eq!(&chunk, b"abcd");
        assert_eq!(replay.read(&mut chunk).unwrap(), 2);
        assert_eq!(&chunk[..2], b"ef");
    }

    #[test]
    fn drain_skips_to_the_limit() {
        let cursor = Cursor::new(b"0123456789".to_vec());
        let bounded = cursor.take(6);
        let mut stream = drain_bounded(bounded).unwrap();

        let mut rest = Vec::new();
        stream.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"6789");
    }

    #[test]
    fn drain_of_consumed_view_is_a_noop() {
        let cursor = Cursor::new(b"abc".to_vec());
        let mut bounded = cursor.take(3);
        let mut buf = Vec::new();
        bounded.read_to_end(&mut buf).unwrap();

        let mut stream = drain_bounded(bounded).unwrap();
        let mut rest = Vec::new();
        stream.read_to_end(&mut rest).unwrap();
        assert!(rest.is_empty());
    }
}
