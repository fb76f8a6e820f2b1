#![no_main]

use libfuzzer_sys::fuzz_target;

use tlg_wire::record::{PREFIX_SIZE, RecordPrefix};

// Fuzz target: record prefix parsing. The parse itself is infallible on
// a full prefix; the interesting property is that classification of the
// opcode byte never panics.
fuzz_target!(|data: &[u8]| {
    if data.len() >= PREFIX_SIZE {
        let bytes: [u8; PREFIX_SIZE] = data[..PREFIX_SIZE].try_into().unwrap();
        let prefix = RecordPrefix::from_bytes(&bytes);
        let _ = tlg_decoder::TokenKind::from_opcode(prefix.opcode);
    }
});
