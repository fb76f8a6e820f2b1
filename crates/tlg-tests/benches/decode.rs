use criterion::{Criterion, Throughput, criterion_group, criterion_main};

use tlg_decoder::{Lexer, LexerOptions};
use tlg_tests::StreamBuilder;
use tlg_wire::chunk::Compression;
use tlg_wire::record::opcode;

/// Drain a stream, counting tokens so the work isn't optimized away.
fn lex_all(bytes: &[u8], options: LexerOptions) -> usize {
    let mut lexer = Lexer::with_options(std::io::Cursor::new(bytes), options).unwrap();
    let mut buf = Vec::new();
    let mut count = 0;
    while lexer.next_token(&mut buf).unwrap().is_some() {
        count += 1;
    }
    count
}

fn plain_stream(message_count: usize, message_size: usize) -> Vec<u8> {
    let payload = vec![0x5A; message_size];
    let mut builder = StreamBuilder::new().record(opcode::HEADER, b"bench");
    for _ in 0..message_count {
        builder = builder.record(opcode::MESSAGE, &payload);
    }
    builder.record(opcode::FOOTER, b"").finish()
}

fn chunked_stream(compression: Compression, chunk_count: usize) -> Vec<u8> {
    let payload = vec![0x5A; 256];
    let records: Vec<(u8, &[u8])> = (0..64).map(|_| (opcode::MESSAGE, &payload[..])).collect();

    let mut builder = StreamBuilder::new().record(opcode::HEADER, b"bench");
    for _ in 0..chunk_count {
        builder = builder.chunk(compression, &records);
    }
    builder.record(opcode::FOOTER, b"").finish()
}

fn bench_plain(c: &mut Criterion) {
    let bytes = plain_stream(1024, 256);

    let mut group = c.benchmark_group("lex_plain");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("1024x256B", |b| {
        b.iter(|| lex_all(&bytes, LexerOptions::default()));
    });
    group.finish();
}

fn bench_chunked(c: &mut Criterion) {
    let mut group = c.benchmark_group("lex_chunked");

    for compression in [Compression::None, Compression::Lz4, Compression::Zstd] {
        let bytes = chunked_stream(compression, 16);
        let label = if compression == Compression::None {
            "none"
        } else {
            compression.name()
        };

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_function(format!("{label}/lazy"), |b| {
            b.iter(|| lex_all(&bytes, LexerOptions::default()));
        });
        group.bench_function(format!("{label}/validated"), |b| {
            b.iter(|| {
                lex_all(
                    &bytes,
                    LexerOptions {
                        validate_crc: true,
                        ..LexerOptions::default()
                    },
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_plain, bench_chunked);
criterion_main!(benches);
