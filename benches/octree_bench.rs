//! Octree insertion and query benchmarks.
//!
//! Points are drawn uniformly from the unit cube with a fixed seed, so every
//! run builds the same tree.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use octant_phase::glam::Vec3A;
use octant_phase::{BoundingBox, Octree, TemporalOctree};
use rand::{rngs::StdRng, Rng, SeedableRng};

const NUM_POINTS: usize = 10_000;

fn bounds() -> BoundingBox {
    BoundingBox::new(Vec3A::splat(-1.0), Vec3A::splat(1.0))
}

fn random_points(n: usize) -> Vec<Vec3A> {
    let mut rng = StdRng::seed_from_u64(0x0c7a);
    (0..n)
        .map(|_| {
            Vec3A::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            )
        })
        .collect()
}

fn build(points: &[Vec3A], max_depth: u8) -> Octree<usize> {
    let mut tree = Octree::with_bounds(bounds(), max_depth);
    for (i, &p) in points.iter().enumerate() {
        tree.insert(p, i);
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    let points = random_points(NUM_POINTS);
    let mut group = c.benchmark_group("insert");
    for max_depth in [4u8, 6, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(max_depth),
            &max_depth,
            |b, &max_depth| b.iter(|| build(black_box(&points), max_depth)),
        );
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let points = random_points(NUM_POINTS);
    let tree = build(&points, 8);

    c.bench_function("find", |b| {
        b.iter(|| {
            points
                .iter()
                .filter(|&&p| tree.find(black_box(p)).is_some())
                .count()
        })
    });

    let corner = BoundingBox::new(Vec3A::splat(0.5), Vec3A::splat(1.0));
    c.bench_function("query_bbox_corner", |b| {
        b.iter(|| tree.query_bbox(black_box(&corner)).len())
    });

    c.bench_function("query_radius", |b| {
        b.iter(|| tree.query_radius(black_box(Vec3A::ZERO), 0.25).len())
    });

    let mut temporal = TemporalOctree::with_bounds(bounds(), 6);
    for (i, &p) in points.iter().enumerate() {
        temporal.insert((i % 12) as u8, p, i);
    }
    c.bench_function("query_bbox_all_phases", |b| {
        b.iter(|| temporal.query_bbox_all_phases(black_box(&corner)).len())
    });
}

criterion_group!(benches, bench_insert, bench_queries);
criterion_main!(benches);
