//! Basalt Criterion Benchmark
//!
//! Derivation cost across memory sizes and lane counts, and the allocation
//! saving of the pooled surface.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::prelude::*;
use std::hint::black_box;

const KIB: u32 = 1024;

fn random_salt() -> [u8; 16] {
    let mut salt = [0u8; 16];
    rand::rng().fill(&mut salt[..]);
    salt
}

// =============================================================================
// BENCHMARK 1: MEMORY SCALING
// =============================================================================

/// One-shot Argon2id cost as the matrix grows (time = 1, 4 lanes).
fn bench_memory_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Memory-Scaling");
    group.sample_size(20);
    let salt = random_salt();

    for (memory, name) in [
        (KIB, "1MiB"),
        (8 * KIB, "8MiB"),
        (32 * KIB, "32MiB"),
        (64 * KIB, "64MiB"),
    ] {
        group.throughput(Throughput::Bytes(u64::from(memory) * 1024));
        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(name),
            &memory,
            |b, &memory| {
                b.iter(|| basalt::id_key(black_box(b"password"), &salt, 1, memory, 4, 32))
            },
        );
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 2: POOL REUSE
// =============================================================================

/// Fresh allocation per call vs a leased matrix, same cost parameters.
fn bench_pool_reuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Pool-Reuse");
    group.sample_size(30);
    let salt = random_salt();
    let memory = 8 * KIB;
    group.throughput(Throughput::Bytes(u64::from(memory) * 1024));

    group.bench_function("oneshot", |b| {
        b.iter(|| basalt::id_key(black_box(b"password"), &salt, 1, memory, 4, 32))
    });

    let pool = basalt::IdKeyPool::new(1, memory, 4);
    // Prime the free list so the loop measures reuse, not first allocation.
    let _ = pool.derive(b"password", &salt, &[], &[], 32);
    group.bench_function("pooled", |b| {
        b.iter(|| pool.derive(black_box(b"password"), &salt, &[], &[], 32))
    });

    group.finish();
}

// =============================================================================
// BENCHMARK 3: LANE SCALING
// =============================================================================

/// Parallel speedup over lane counts at a fixed 32 MiB working set.
fn bench_lane_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("3-Lane-Scaling");
    group.sample_size(20);
    let salt = random_salt();
    let memory = 32 * KIB;
    group.throughput(Throughput::Bytes(u64::from(memory) * 1024));

    for threads in [1u8, 2, 4, 8] {
        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(format!("{threads}lanes")),
            &threads,
            |b, &threads| {
                b.iter(|| basalt::id_key(black_box(b"password"), &salt, 1, memory, threads, 32))
            },
        );
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 4: VARIANTS
// =============================================================================

/// Argon2i vs Argon2id at their recommended pass counts.
fn bench_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("4-Variants");
    group.sample_size(20);
    let salt = random_salt();

    group.bench_function("argon2i-t3-8MiB", |b| {
        b.iter(|| basalt::key(black_box(b"password"), &salt, 3, 8 * KIB, 4, 32))
    });
    group.bench_function("argon2id-t1-8MiB", |b| {
        b.iter(|| basalt::id_key(black_box(b"password"), &salt, 1, 8 * KIB, 4, 32))
    });

    group.finish();
}

// =============================================================================
// MAIN
// =============================================================================

criterion_group!(
    benches,
    bench_memory_scaling,
    bench_pool_reuse,
    bench_lane_scaling,
    bench_variants,
);

criterion_main!(benches);
