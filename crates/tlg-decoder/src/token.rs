use tlg_wire::record::opcode;

/// The classified kind of a decoded record.
///
/// One variant per opcode in the closed wire set. There is no `Unknown`
/// variant on purpose: a record with an unrecognized nonzero opcode is
/// structurally skipped by the lexer (newer writers may emit kinds this
/// reader predates), so callers never observe one.
///
/// ```text
/// ┌──────┬─────────────────┬──────┬─────────────────┐
/// │ Wire │ Variant         │ Wire │ Variant         │
/// ├──────┼─────────────────┼──────┼─────────────────┤
/// │ 0x01 │ Header          │ 0x09 │ Attachment      │
/// │ 0x02 │ Footer          │ 0x0A │ AttachmentIndex │
/// │ 0x03 │ Schema          │ 0x0B │ Statistics      │
/// │ 0x04 │ Channel         │ 0x0C │ Metadata        │
/// │ 0x05 │ Message         │ 0x0D │ MetadataIndex   │
/// │ 0x06 │ Chunk           │ 0x0E │ SummaryOffset   │
/// │ 0x07 │ MessageIndex    │ 0x0F │ DataEnd         │
/// │ 0x08 │ ChunkIndex      │      │                 │
/// └──────┴─────────────────┴──────┴─────────────────┘
/// ```
///
/// `Chunk` only reaches callers in pass-through mode; with transparent
/// expansion the lexer consumes chunk records itself and yields their
/// contents instead.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum TokenKind {
    Header,
    Footer,
    Schema,
    Channel,
    Message,
    Chunk,
    MessageIndex,
    ChunkIndex,
    Attachment,
    AttachmentIndex,
    Statistics,
    Metadata,
    MetadataIndex,
    SummaryOffset,
    DataEnd,
}

impl TokenKind {
    /// Classify a wire opcode.
    ///
    /// Returns `None` for any value outside the closed set — including
    /// 0x00, whose rejection is the lexer's job, not classification's.
    #[must_use]
    pub fn from_opcode(op: u8) -> Option<Self> {
        match op {
            opcode::HEADER => Some(Self::Header),
            opcode::FOOTER => Some(Self::Footer),
            opcode::SCHEMA => Some(Self::Schema),
            opcode::CHANNEL => Some(Self::Channel),
            opcode::MESSAGE => Some(Self::Message),
            opcode::CHUNK => Some(Self::Chunk),
            opcode::MESSAGE_INDEX => Some(Self::MessageIndex),
            opcode::CHUNK_INDEX => Some(Self::ChunkIndex),
            opcode::ATTACHMENT => Some(Self::Attachment),
            opcode::ATTACHMENT_INDEX => Some(Self::AttachmentIndex),
            opcode::STATISTICS => Some(Self::Statistics),
            opcode::METADATA => Some(Self::Metadata),
            opcode::METADATA_INDEX => Some(Self::MetadataIndex),
            opcode::SUMMARY_OFFSET => Some(Self::SummaryOffset),
            opcode::DATA_END => Some(Self::DataEnd),
            _ => None,
        }
    }

    /// The single-byte wire opcode for this kind.
    #[must_use]
    pub fn opcode(self) -> u8 {
        match self {
            Self::Header => opcode::HEADER,
            Self::Footer => opcode::FOOTER,
            Self::Schema => opcode::SCHEMA,
            Self::Channel => opcode::CHANNEL,
            Self::Message => opcode::MESSAGE,
            Self::Chunk => opcode::CHUNK,
            Self::MessageIndex => opcode::MESSAGE_INDEX,
            Self::ChunkIndex => opcode::CHUNK_INDEX,
            Self::Attachment => opcode::ATTACHMENT,
            Self::AttachmentIndex => opcode::ATTACHMENT_INDEX,
            Self::Statistics => opcode::STATISTICS,
            Self::Metadata => opcode::METADATA,
            Self::MetadataIndex => opcode::METADATA_INDEX,
            Self::SummaryOffset => opcode::SUMMARY_OFFSET,
            Self::DataEnd => opcode::DATA_END,
        }
    }

    /// Human-readable display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Schema => "schema",
            Self::Channel => "channel",
            Self::Message => "message",
            Self::Chunk => "chunk",
            Self::MessageIndex => "message index",
            Self::ChunkIndex => "chunk index",
            Self::Attachment => "attachment",
            Self::AttachmentIndex => "attachment index",
            Self::Statistics => "statistics",
            Self::Metadata => "metadata",
            Self::MetadataIndex => "metadata index",
            Self::SummaryOffset => "summary offset",
            Self::DataEnd => "data end",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TokenKind; 15] = [
        TokenKind::Header,
        TokenKind::Footer,
        TokenKind::Schema,
        TokenKind::Channel,
        TokenKind::Message,
        TokenKind::Chunk,
        TokenKind::MessageIndex,
        TokenKind::ChunkIndex,
        TokenKind::Attachment,
        TokenKind::AttachmentIndex,
        TokenKind::Statistics,
        TokenKind::Metadata,
        TokenKind::MetadataIndex,
        TokenKind::SummaryOffset,
        TokenKind::DataEnd,
    ];

    #[test]
    fn all_kinds_roundtrip_through_opcode() {
        for kind in ALL {
            assert_eq!(
                TokenKind::from_opcode(kind.opcode()),
                Some(kind),
                "roundtrip mismatch for {kind:?}"
            );
        }
    }

    #[test]
    fn opcodes_are_contiguous() {
        // The closed set occupies 0x01..=0x0F with no gaps.
        let mut opcodes: Vec<u8> = ALL.iter().map(|k| k.opcode()).collect();
        opcodes.sort_unstable();
        assert_eq!(opcodes, (0x01..=0x0F).collect::<Vec<u8>>());
    }

    #[test]
    fn zero_is_not_classified() {
        assert_eq!(TokenKind::from_opcode(0x00), None);
    }

    #[test]
    fn unknown_opcodes_not_classified() {
        assert_eq!(TokenKind::from_opcode(0x10), None);
        assert_eq!(TokenKind::from_opcode(0x7F), None);
        assert_eq!(TokenKind::from_opcode(0xFF), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(TokenKind::Header.to_string(), "header");
        assert_eq!(TokenKind::MessageIndex.to_string(), "message index");
        assert_eq!(TokenKind::SummaryOffset.to_string(), "summary offset");
        assert_eq!(TokenKind::DataEnd.to_string(), "data end");
    }
}
