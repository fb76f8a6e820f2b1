#![no_main]

use libfuzzer_sys::fuzz_target;

use tlg_wire::chunk::{ChunkPrelude, Compression};

// Fuzz target: chunk prelude and compression-name parsing on raw bytes.
fuzz_target!(|data: &[u8]| {
    let _ = ChunkPrelude::parse(data);
    let _ = Compression::from_name(data);
});
