#![forbid(unsafe_code)]

//! Benchmarks for snapshot capture and navigation.
//!
//! Run with: cargo bench -p rewind-core --bench capture_bench
//!
//! Compares recording 1000 frames of a 4 KiB `Vec` against an `im::Vector`
//! of the same length, with and without a history limit, plus a full
//! undo-to-start / redo-to-end sweep.

use std::hint::black_box;
use std::num::NonZeroUsize;

use criterion::{Criterion, criterion_group, criterion_main};
use rewind_core::{HistoryAdapter, HistoryAdapterConfig, UndoableMeta};

const FRAMES: usize = 1000;
const LEN: usize = 4096;

fn config(limit: Option<usize>) -> HistoryAdapterConfig {
    match limit.and_then(NonZeroUsize::new) {
        Some(limit) => HistoryAdapterConfig::new().with_limit(limit),
        None => HistoryAdapterConfig::unlimited(),
    }
}

fn bench_capture(c: &mut Criterion) {
    let mut group = c.benchmark_group("capture");

    for (name, limit) in [("vec_unbounded", None), ("vec_limit_100", Some(100))] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut adapter = HistoryAdapter::new(config(limit));
                let mut state = adapter.get_initial_state(vec![0u8; LEN]);
                for i in 0..FRAMES {
                    adapter.apply_undoable(&mut state, &UndoableMeta::default(), |v, _| {
                        v[i % LEN] = v[i % LEN].wrapping_add(1);
                    });
                }
                black_box(state.past_len())
            });
        });
    }

    group.bench_function("im_vector_unbounded", |b| {
        b.iter(|| {
            let mut adapter = HistoryAdapter::new(config(None));
            let mut state = adapter.get_initial_state(im::Vector::from(vec![0u8; LEN]));
            for i in 0..FRAMES {
                adapter.apply_undoable(&mut state, &UndoableMeta::default(), |v, _| {
                    v.set(i % LEN, (i % 251) as u8);
                });
            }
            black_box(state.past_len())
        });
    });

    group.bench_function("grouped_coalesce", |b| {
        b.iter(|| {
            let mut adapter = HistoryAdapter::new(config(None));
            let mut state = adapter.get_initial_state(vec![0u8; LEN]);
            let meta = UndoableMeta::grouped("typing");
            for i in 0..FRAMES {
                adapter.apply_undoable(&mut state, &meta, |v, _| v[i % LEN] = 1);
            }
            black_box(state.past_len())
        });
    });

    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    let mut adapter = HistoryAdapter::new(config(None));
    let mut state = adapter.get_initial_state(0u64);
    for i in 0..FRAMES as u64 {
        adapter.apply_undoable(&mut state, &UndoableMeta::default(), |n, _| *n = i);
    }

    c.bench_function("jump_sweep", |b| {
        b.iter(|| {
            let back = adapter.jump(&mut state, -(FRAMES as isize));
            let forward = adapter.jump(&mut state, FRAMES as isize);
            black_box((back, forward))
        });
    });
}

criterion_group!(benches, bench_capture, bench_navigation);
criterion_main!(benches);
