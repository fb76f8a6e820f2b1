#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended before a complete fixed-width scalar or header could
    /// be read. The offset is the byte position from the start of the
    /// slice where the read failed.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// A chunk named a compression this reader does not implement.
    ///
    /// The recognized names are the empty string, "lz4", and "zstd".
    /// A non-UTF-8 name is reported here lossily rather than as a
    /// separate encoding error.
    #[error("unsupported compression: {name:?}")]
    UnsupportedCompression { name: String },
}
