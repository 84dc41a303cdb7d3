//! TextStreamBuffer benchmark: Measure append and shift throughput.
//!
//! Target: < 1µs per streamed token, with compaction amortized away

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use spiral::{sanitize, shuffle_chunk, TextStreamBuffer, TextStreamConfig};

const TOKENS: &[&str] = &[
    "Letters ", "arrive ", "in ", "bursts, ", "cleaned ", "and ", "shuffled. ",
];

fn config(chunk_size: usize) -> TextStreamConfig {
    TextStreamConfig {
        chunk_size,
        shuffle_radius: 3,
    }
}

fn stream_sanitize(c: &mut Criterion) {
    let raw = "Hello,   world!\n\tStreaming text; with punctuation... ".repeat(20);

    c.bench_function("sanitize_1k", |b| {
        b.iter(|| black_box(sanitize(black_box(&raw))));
    });
}

fn stream_shuffle(c: &mut Criterion) {
    let mut group = c.benchmark_group("shuffle_chunk");

    for len in [16, 64, 256] {
        let chars: Vec<char> = (0..len).map(|i| (b'A' + (i % 26) as u8) as char).collect();
        group.bench_with_input(BenchmarkId::from_parameter(len), &chars, |b, chars| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| black_box(shuffle_chunk(chars, 3, &mut rng)));
        });
    }

    group.finish();
}

fn stream_append_tokens(c: &mut Criterion) {
    c.bench_function("stream_append_token", |b| {
        let mut buffer = TextStreamBuffer::with_seed("", config(32), 1).unwrap();
        let mut i = 0;
        b.iter(|| {
            buffer.append(black_box(TOKENS[i % TOKENS.len()]));
            // Keep the store bounded so the measurement stays steady.
            buffer.advance(buffer.len());
            i += 1;
        });
    });
}

fn stream_append_and_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_drain");

    for chunk_size in [8, 32, 128] {
        group.bench_with_input(
            BenchmarkId::new("tokens_1k", chunk_size),
            &chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut buffer =
                        TextStreamBuffer::with_seed("", config(chunk_size), 1).unwrap();
                    let mut drained = 0usize;
                    for i in 0..1_000 {
                        buffer.append(TOKENS[i % TOKENS.len()]);
                        while buffer.shift().is_some() {
                            drained += 1;
                        }
                    }
                    black_box(drained)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    stream_sanitize,
    stream_shuffle,
    stream_append_tokens,
    stream_append_and_drain,
);
criterion_main!(benches);
