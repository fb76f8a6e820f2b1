#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use tlg_decoder::{Lexer, LexerOptions};

// Fuzz target: the full lexer entry point.
//
// Feeds arbitrary bytes through `Lexer::next_token` under every
// combination of construction options. Catches bugs in:
// - Magic prefix validation
// - Record prefix framing and payload reads
// - Chunk header parsing and compression dispatch
// - Lazy and validated decompression paths (lz4/zstd on garbage input)
// - The in-chunk exhaustion/revert state machine
//
// Every outcome is acceptable except a panic or an abort.
#[derive(Arbitrary, Debug)]
struct LexInput {
    skip_magic: bool,
    validate_crc: bool,
    emit_chunks: bool,
    data: Vec<u8>,
}

fuzz_target!(|input: LexInput| {
    let options = LexerOptions {
        skip_magic: input.skip_magic,
        validate_crc: input.validate_crc,
        emit_chunks: input.emit_chunks,
    };
    let Ok(mut lexer) = Lexer::with_options(std::io::Cursor::new(input.data), options) else {
        return;
    };
    let mut buf = Vec::new();
    while let Ok(Some(_)) = lexer.next_token(&mut buf) {}
});
