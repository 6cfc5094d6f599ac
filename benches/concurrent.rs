//! Concurrent insert throughput benchmarks.
//!
//! Replays the deduplication workload end to end: a stream of `TOTAL`
//! hashes containing exactly `UNIQUE` distinct values is split into
//! per-thread contiguous chunks and inserted with a fixed prefetch stride,
//! sweeping thread counts for both set implementations. Each run's final
//! `len()` is checked against the known unique count.

use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput,
};
use dedupset::{ConcurrentSet, LockFreeSet, ShardedSet};
use rand::{thread_rng, Rng};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

/// Prefetch this many stream positions ahead of the insert cursor.
const PREFETCH_STRIDE: usize = 16;

const TOTAL: usize = 1_000_000;
const UNIQUE: usize = 100_000;
const THREAD_COUNTS: [usize; 4] = [1, 2, 4, 8];

/// Build a hash stream of `total` values drawing from exactly `unique`
/// distinct nonzero keys. The first `unique` positions cover every distinct
/// key once; the rest are random repeats.
fn generate_stream(total: usize, unique: usize) -> Vec<u64> {
    let mut rng = thread_rng();

    let mut distinct = HashSet::with_capacity(unique);
    while distinct.len() < unique {
        let hash: u64 = rng.gen();
        if hash != 0 && hash != u64::MAX {
            distinct.insert(hash);
        }
    }
    let distinct: Vec<u64> = distinct.into_iter().collect();

    (0..total)
        .map(|i| {
            if i < unique {
                distinct[i]
            } else {
                distinct[rng.gen_range(0..unique)]
            }
        })
        .collect()
}

/// Insert one contiguous chunk, prefetching a fixed stride ahead.
fn process_chunk<S: ConcurrentSet>(set: &S, chunk: &[u64]) {
    for i in 0..chunk.len() {
        if i + PREFETCH_STRIDE < chunk.len() {
            set.prefetch(chunk[i + PREFETCH_STRIDE]);
        }
        set.insert(chunk[i]);
    }
}

/// Run the full stream through a set with `threads` workers and verify the
/// final size against the ground-truth unique count.
fn run_stream<S: ConcurrentSet + 'static>(set: Arc<S>, stream: &Arc<Vec<u64>>, threads: usize) {
    let chunk_len = stream.len() / threads;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let set = Arc::clone(&set);
            let stream = Arc::clone(stream);
            let beg = t * chunk_len;
            let end = if t == threads - 1 {
                stream.len()
            } else {
                beg + chunk_len
            };
            thread::spawn(move || process_chunk(&*set, &stream[beg..end]))
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(set.len(), UNIQUE, "unique-count mismatch");
}

fn bench_thread_sweep(c: &mut Criterion) {
    let stream = Arc::new(generate_stream(TOTAL, UNIQUE));

    let mut group = c.benchmark_group("concurrent_inserts");
    group.sample_size(10);
    group.throughput(Throughput::Elements(TOTAL as u64));

    for &threads in &THREAD_COUNTS {
        group.bench_with_input(
            BenchmarkId::new("sharded", threads),
            &threads,
            |b, &threads| {
                b.iter_batched(
                    || Arc::new(ShardedSet::new(threads).unwrap()),
                    |set| {
                        run_stream(set, &stream, threads);
                    },
                    criterion::BatchSize::LargeInput,
                );
            },
        );

        group.bench_with_input(
            BenchmarkId::new("lockfree", threads),
            &threads,
            |b, &threads| {
                b.iter_batched(
                    || Arc::new(LockFreeSet::new(UNIQUE).unwrap()),
                    |set| {
                        run_stream(set, &stream, threads);
                    },
                    criterion::BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_single_thread_duplicates(c: &mut Criterion) {
    // Duplicate-heavy tail of the stream: the common path once a set warms
    // up is "already present".
    let keys: Vec<u64> = (1..=10_000u64).collect();

    let mut group = c.benchmark_group("duplicate_inserts");
    group.throughput(Throughput::Elements(keys.len() as u64));

    group.bench_function("sharded", |b| {
        let set = ShardedSet::new(1).unwrap();
        for &k in &keys {
            set.insert(k);
        }
        b.iter(|| {
            for &k in &keys {
                black_box(set.insert(black_box(k)));
            }
        });
    });

    group.bench_function("lockfree", |b| {
        let set = LockFreeSet::new(keys.len()).unwrap();
        for &k in &keys {
            set.insert(k);
        }
        b.iter(|| {
            for &k in &keys {
                black_box(set.insert(black_box(k)));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_thread_sweep, bench_single_thread_duplicates);
criterion_main!(benches);
