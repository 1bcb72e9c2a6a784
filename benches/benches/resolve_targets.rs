// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Vec2};
use understory_dnd::registry::DropTargetDescriptor;
use understory_dnd::{CollisionAlgorithm, DraggableConfig, DropProvider};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// A grid of `n * n` drop zones, each `cell` wide.
fn grid_provider(n: usize, cell: f64) -> DropProvider<u32> {
    let mut p = DropProvider::new();
    for y in 0..n {
        for x in 0..n {
            let r = Rect::from_origin_size((x as f64 * cell, y as f64 * cell), (cell, cell));
            p.register_drop_target(DropTargetDescriptor::new("zone").with_rect(r))
                .unwrap();
        }
    }
    p
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_active_target");
    for &n in &[8usize, 16, 32] {
        let mut p = grid_provider(n, 50.0);
        let probe = p.register_draggable(DraggableConfig::default(), 0).unwrap();
        let span = n as f64 * 50.0;
        let mut rng = Rng::new(0xD2A6_D20B_5EED_0001);
        let probes: Vec<Rect> = (0..256)
            .map(|_| {
                Rect::from_origin_size((rng.next_f64() * span, rng.next_f64() * span), (30.0, 30.0))
            })
            .collect();
        group.throughput(Throughput::Elements(probes.len() as u64));
        for alg in [
            CollisionAlgorithm::Center,
            CollisionAlgorithm::Intersect,
            CollisionAlgorithm::Contain,
        ] {
            group.bench_function(format!("{alg:?}/{n}x{n}"), |b| {
                b.iter(|| {
                    let mut hits = 0;
                    for r in &probes {
                        if p.registry().resolve_active_target(*r, alg, probe).is_some() {
                            hits += 1;
                        }
                    }
                    black_box(hits)
                });
            });
        }
    }
    group.finish();
}

fn bench_drag_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_samples");
    for &n in &[8usize, 32] {
        group.bench_function(format!("sweep/{n}x{n}"), |b| {
            b.iter_batched(
                || {
                    let mut p = grid_provider(n, 50.0);
                    let id = p.register_draggable(DraggableConfig::default(), 1).unwrap();
                    p.set_draggable_origin(id, Some(Rect::new(0.0, 0.0, 30.0, 30.0)));
                    (p, id)
                },
                |(mut p, id)| {
                    p.begin(id);
                    for _ in 0..n * 4 {
                        p.update(id, Vec2::new(12.0, 12.0));
                    }
                    p.end(id);
                    black_box(p.take_events().len())
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_drag_samples);
criterion_main!(benches);
