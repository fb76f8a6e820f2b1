use crate::error::WireError;

/// Decode a little-endian `u32` from `buf` starting at `offset`.
///
/// # Returns
///
/// `(value, next_offset)` on success, where `next_offset` is the position
/// immediately after the four consumed bytes, ready to feed back in for
/// the next field.
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if fewer than four bytes remain at
/// `offset`. The reported offset is where the read started.
pub fn get_u32_le(buf: &[u8], offset: usize) -> Result<(u32, usize), WireError> {
    let end = offset
        .checked_add(4)
        .ok_or(WireError::UnexpectedEof { offset })?;
    let bytes: [u8; 4] = buf
        .get(offset..end)
        .ok_or(WireError::UnexpectedEof { offset })?
        .try_into()
        .expect("slice length checked");
    Ok((u32::from_le_bytes(bytes), end))
}

/// Decode a little-endian `u64` from `buf` starting at `offset`.
///
/// Same contract as [`get_u32_le`], consuming eight bytes.
///
/// # Wire format examples
///
/// | Bytes (LE)                                       | Value   |
/// |--------------------------------------------------|---------|
/// | `[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]` | 0     |
/// | `[0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]` | 5     |
/// | `[0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]` | 256   |
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if fewer than eight bytes remain.
pub fn get_u64_le(buf: &[u8], offset: usize) -> Result<(u64, usize), WireError> {
    let end = offset
        .checked_add(8)
        .ok_or(WireError::UnexpectedEof { offset })?;
    let bytes: [u8; 8] = buf
        .get(offset..end)
        .ok_or(WireError::UnexpectedEof { offset })?
        .try_into()
        .expect("slice length checked");
    Ok((u64::from_le_bytes(bytes), end))
}
