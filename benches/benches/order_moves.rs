// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Vec2;
use understory_sortable::layout::{Axis, SlotLayout};
use understory_sortable::order::OrderStore;
use understory_sortable::{SortableConfig, SortableList};

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_moves");
    for &n in &[16u32, 256, 4096] {
        group.throughput(Throughput::Elements(64));
        group.bench_function(format!("splice/{n}"), |b| {
            b.iter_batched(
                || OrderStore::from_items(0..n).unwrap(),
                |mut store| {
                    for i in 0..64 {
                        let active = (i * 7919) % n;
                        let over = (i * 104_729) % n;
                        black_box(store.move_item(&active, &over));
                    }
                    store
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("sync/{n}"), |b| {
            b.iter_batched(
                || OrderStore::from_items(0..n).unwrap(),
                |mut store| {
                    store.sync((0..n).filter(|i| i % 3 != 0).chain(n..n + 8));
                    store
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_slot_at(c: &mut Criterion) {
    let layout = SlotLayout::new(Axis::Vertical, 44.0)
        .and_then(|l| l.with_gap(4.0))
        .and_then(|l| l.with_leading_padding(12.0))
        .unwrap();
    c.bench_function("slot_at/10k", |b| {
        b.iter(|| {
            let mut acc = 0;
            for i in 0..10_000 {
                acc += layout.slot_at(black_box(f64::from(i) * 3.3), 1000).unwrap_or(0);
            }
            black_box(acc)
        });
    });
}

fn bench_list_drag(c: &mut Criterion) {
    c.bench_function("sortable_drag/1000", |b| {
        b.iter_batched(
            || SortableList::new(SortableConfig::new(Axis::Vertical, 40.0), 0..1000_u32).unwrap(),
            |mut list| {
                list.begin(&0);
                for _ in 0..200 {
                    list.update(Vec2::new(0.0, 20.0));
                }
                list.end();
                black_box(list.take_events().len())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_moves, bench_slot_at, bench_list_drag);
criterion_main!(benches);
