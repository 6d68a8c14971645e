//! Criterion micro-benchmarks for flood-fill painting and best-cell search.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use glam::{IVec2, Vec2};
use miasma_core::FalloffCurve;
use miasma_field::{CompositionBuffer, FalloffTemplate, InfluenceField};
use miasma_space::{GridGeometry, ValidityMask};

fn geometry() -> GridGeometry {
    GridGeometry::new(1.0, Vec2::splat(-64.0), Vec2::splat(64.0)).unwrap()
}

/// Every seventh column blocked except for a door every eleventh row.
fn maze_mask(g: &GridGeometry) -> ValidityMask {
    ValidityMask::from_fn(g, |c| c.x % 7 != 0 || c.y % 11 == 0)
}

/// Benchmark: paint and erase a radius-8 Linear template on an open grid.
fn bench_paint_open_r8(c: &mut Criterion) {
    let g = geometry();
    let mut field = InfluenceField::whole(&g, ValidityMask::all_valid(&g));
    let template = FalloffTemplate::bake(FalloffCurve::Linear, 8, 1.0);
    let origin = g.world_origin();

    c.bench_function("paint_open_r8", |b| {
        b.iter(|| {
            black_box(field.paint(origin, &template, 1.0));
            black_box(field.paint(origin, &template, -1.0));
        });
    });
}

/// Benchmark: same template through a walled maze.
fn bench_paint_maze_r8(c: &mut Criterion) {
    let g = geometry();
    let mut field = InfluenceField::whole(&g, maze_mask(&g));
    let template = FalloffTemplate::bake(FalloffCurve::Linear, 8, 1.0);
    let origin = g.world_origin() + IVec2::new(2, 3);

    c.bench_function("paint_maze_r8", |b| {
        b.iter(|| {
            black_box(field.paint(origin, &template, 1.0));
            black_box(field.paint(origin, &template, -1.0));
        });
    });
}

/// Benchmark: blend two fields into a radius-10 buffer and search it.
fn bench_compose_and_search_r10(c: &mut Criterion) {
    let g = geometry();
    let mask = maze_mask(&g);
    let mut a = InfluenceField::whole(&g, mask.clone());
    let mut b = InfluenceField::whole(&g, mask.clone());
    let template = FalloffTemplate::bake(FalloffCurve::Linear, 10, 1.0);
    a.paint(g.world_origin() + IVec2::new(4, 1), &template, 1.0);
    b.paint(g.world_origin() - IVec2::new(3, 2), &template, 1.0);
    let interest = FalloffTemplate::bake(FalloffCurve::Read, 10, 1.0);
    let mut buffer = CompositionBuffer::new(&g, mask, 1);
    let anchor = g.position_of_coord(g.world_origin());

    c.bench_function("compose_and_search_r10", |bench| {
        bench.iter(|| {
            buffer.reinit(anchor, 10);
            buffer.add_field(&a, 1.0);
            buffer.subtract_field(&b, 0.5);
            buffer.normalize();
            black_box(buffer.find_best_cell(&interest));
        });
    });
}

criterion_group!(
    benches,
    bench_paint_open_r8,
    bench_paint_maze_r8,
    bench_compose_and_search_r10
);
criterion_main!(benches);
