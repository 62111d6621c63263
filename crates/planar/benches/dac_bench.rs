//! Criterion benchmarks for the divide-and-conquer tree.
//! Focus sizes: n in {64, 256, 1024}.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p planar

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use planar::prelude::*;

fn cloud(n: usize, seed: u64) -> Vec<Point> {
    draw_points(
        CloudCfg {
            count: n,
            shape: CloudShape::Disk { radius: 100.0 },
        },
        ReplayToken { seed, index: 0 },
    )
}

fn bench_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("dac");
    for &n in &[64usize, 256, 1024] {
        group.bench_with_input(BenchmarkId::new("convex_hull", n), &n, |b, &n| {
            b.iter_batched(
                || DacTree::build(cloud(n, 7), builtin::algorithms()).unwrap(),
                |mut tree| {
                    let _h = tree.process_algorithm(&AlgorithmName::CONVEX_HULL).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("voronoi_diagram", n), &n, |b, &n| {
            b.iter_batched(
                || DacTree::build(cloud(n, 8), builtin::algorithms()).unwrap(),
                |mut tree| {
                    let _v = tree.process_algorithm(&AlgorithmName::VORONOI_DIAGRAM).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("process_all", n), &n, |b, &n| {
            b.iter_batched(
                || DacTree::build(cloud(n, 9), builtin::algorithms()).unwrap(),
                |mut tree| tree.process_all().unwrap(),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_direct(c: &mut Criterion) {
    let mut group = c.benchmark_group("voronoi_direct");
    for &n in &[16usize, 64] {
        group.bench_with_input(BenchmarkId::new("direct", n), &n, |b, &n| {
            let mut pts = cloud(n, 10);
            pts.sort_by(planar::geom2::cmp_xy);
            let sites = planar::geom2::sites_of(&pts, 0);
            b.iter(|| VoronoiDiagram::direct(&sites))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tree, bench_direct);
criterion_main!(benches);
