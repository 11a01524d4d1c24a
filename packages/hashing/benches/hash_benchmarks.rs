//! Throughput benchmarks for the streaming SHA-256 hasher
//!
//! Compares the in-crate hasher against the `sha2` crate and measures the cost
//! of small-chunk feeding and of the async builder.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hashkit_hashing::{Hash, Sha256};
use sha2::Digest;
use tokio::runtime::Runtime;

/// One-shot hashing across input sizes
fn benchmark_one_shot(c: &mut Criterion) {
    let mut group = c.benchmark_group("sha256_one_shot");

    // 1KB, 64KB, 1MB
    let sizes = [1024, 65536, 1_048_576];

    for size in &sizes {
        group.throughput(Throughput::Bytes(*size as u64));
        let data = vec![0u8; *size];

        group.bench_with_input(BenchmarkId::new("hashkit", size), &data, |b, data| {
            b.iter(|| {
                let digest = Sha256::digest(data).expect("input below length limit");
                std::hint::black_box(digest);
            });
        });

        group.bench_with_input(BenchmarkId::new("sha2", size), &data, |b, data| {
            b.iter(|| std::hint::black_box(sha2::Sha256::digest(data)));
        });
    }
    group.finish();
}

/// Feeding the same 64KB in chunks of different sizes
fn benchmark_chunking(c: &mut Criterion) {
    let mut group = c.benchmark_group("sha256_chunking");
    let data = vec![0xa5u8; 65536];
    group.throughput(Throughput::Bytes(data.len() as u64));

    for chunk in [1usize, 7, 64, 1000, 8192] {
        group.bench_with_input(BenchmarkId::new("update_chunk", chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                let mut hasher = Sha256::new();
                for part in data.chunks(chunk) {
                    hasher.update(part).expect("input below length limit");
                }
                std::hint::black_box(hasher.finalize().expect("not yet finalized"));
            });
        });
    }
    group.finish();
}

/// Overhead of the spawned async builder relative to direct hashing
fn benchmark_builder(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("builder_overhead");
    let data = vec![0u8; 1024];

    group.bench_function("async_builder_1KB", |b| {
        b.iter(|| {
            rt.block_on(async {
                let digest = Hash::sha256()
                    .compute(data.clone())
                    .await
                    .expect("Hash should succeed");
                std::hint::black_box(digest);
            });
        });
    });

    group.bench_function("direct_1KB", |b| {
        b.iter(|| std::hint::black_box(Sha256::digest(&data).expect("Hash should succeed")));
    });

    group.finish();
}

criterion_group!(benches, benchmark_one_shot, benchmark_chunking, benchmark_builder);
criterion_main!(benches);
