/*!
 * Concurrent Set Benchmarks
 *
 * Single-thread operation throughput plus multi-thread mixed workloads
 * across contention profiles
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use std::thread;
use syncset::{ConcurrentSet, ContentionProfile};

const KEYS: u64 = 1_000;

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    group.bench_function("fresh_keys", |b| {
        b.iter(|| {
            let set = ConcurrentSet::new();
            for key in 0..KEYS {
                set.insert(black_box(key));
            }
            set
        });
    });

    group.bench_function("duplicate_keys", |b| {
        let set = ConcurrentSet::new();
        for key in 0..KEYS {
            set.insert(key);
        }
        b.iter(|| {
            for key in 0..KEYS {
                set.insert(black_box(key));
            }
        });
    });

    group.finish();
}

fn bench_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("contains");

    let set = ConcurrentSet::new();
    for key in 0..KEYS {
        set.insert(key);
    }

    group.bench_function("hit", |b| {
        b.iter(|| {
            for key in 0..KEYS {
                black_box(set.contains(black_box(&key)));
            }
        });
    });

    group.bench_function("miss", |b| {
        b.iter(|| {
            for key in KEYS..2 * KEYS {
                black_box(set.contains(black_box(&key)));
            }
        });
    });

    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");

    let set = ConcurrentSet::new();
    for key in 0..KEYS {
        set.insert(key);
    }

    group.bench_function("to_vec", |b| {
        b.iter(|| black_box(set.to_vec()));
    });

    group.bench_function("for_each_while", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            set.for_each_while(|&key| {
                sum += key;
                true
            });
            black_box(sum)
        });
    });

    group.bench_function("len", |b| {
        b.iter(|| black_box(set.len()));
    });

    group.finish();
}

fn bench_mixed_concurrent(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_concurrent");

    for profile in [
        ContentionProfile::High,
        ContentionProfile::Medium,
        ContentionProfile::Low,
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", profile)),
            &profile,
            |b, &profile| {
                b.iter(|| {
                    let set: Arc<ConcurrentSet<u64>> =
                        Arc::new(ConcurrentSet::with_profile(profile));

                    let handles: Vec<_> = (0..4u64)
                        .map(|worker| {
                            let set = Arc::clone(&set);
                            thread::spawn(move || {
                                for i in 0..KEYS {
                                    let key = (worker * 31 + i) % KEYS;
                                    set.insert(key);
                                    set.contains(&key);
                                    if i % 4 == 0 {
                                        set.remove(&key);
                                    }
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        handle.join().unwrap();
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_contains,
    bench_traversal,
    bench_mixed_concurrent
);
criterion_main!(benches);
