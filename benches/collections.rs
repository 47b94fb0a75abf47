#![allow(unused)]
extern crate dotsupport;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dotsupport::collections::{CursorQueue, LazyMap, QueueItem};
use std::hint::black_box;

struct Entry(String);

impl QueueItem for Entry {
    fn item_name(&self) -> &str {
        &self.0
    }
}

/// Benchmark the two paths of `get_or_add`
///
/// The hit path only takes the shared lock, the miss path takes the upgradeable lock,
/// runs the factory and upgrades to exclusive.
fn bench_lazymap_get_or_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("lazymap_get_or_add");

    let warm: LazyMap<u64, u64> = (0..1024).map(|i| (i, i)).collect();
    group.bench_function("hit", |b| {
        let mut key = 0u64;
        b.iter(|| {
            key = (key + 1) % 1024;
            black_box(warm.get_or_add(black_box(key), || unreachable!()))
        });
    });

    group.bench_function("miss", |b| {
        b.iter_batched(
            LazyMap::<u64, u64>::new,
            |map| {
                for key in 0..64 {
                    black_box(map.get_or_add(key, || key * 2));
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

/// Benchmark a full enqueue / rewind / drain cycle for several queue sizes
fn bench_cursorqueue_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("cursorqueue_cycle");

    for size in [16usize, 256, 1024] {
        let names: Vec<String> = (0..size).map(|i| format!("item{}", i)).collect();
        let middle = names[size / 2].clone();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &names, |b, names| {
            b.iter(|| {
                let mut queue = CursorQueue::with_capacity(size);
                for name in names {
                    queue.enqueue(Entry(name.clone()));
                }
                queue.move_index(&middle);
                let mut read = 0usize;
                while let Some(item) = queue.seek() {
                    read += black_box(item.item_name().len());
                }
                black_box(read)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lazymap_get_or_add, bench_cursorqueue_cycle);
criterion_main!(benches);
