//! Criterion benchmarks for polygon decomposition.
//! Focus sizes: n in {8, 16, 64, 256}.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use graham_decomp::polygon::rand::{draw_polygon_radial, RadialCfg, ReplayToken, VertexCount};
use graham_decomp::{clip_convex, decompose};

fn sample(n: usize, concave: bool, seed: u64) -> graham_decomp::Polygon {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Fixed(n),
        radial_jitter: if concave { 0.45 } else { 0.0 },
        angle_jitter_frac: if concave { 0.3 } else { 0.0 },
        random_phase: false,
        ..RadialCfg::default()
    };
    draw_polygon_radial(cfg, ReplayToken { seed, index: n as u64 }).unwrap()
}

fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose");
    for &n in &[8usize, 16, 64, 256] {
        group.bench_with_input(BenchmarkId::new("concave", n), &n, |b, &n| {
            b.iter_batched(
                || sample(n, true, 43),
                |mut poly| {
                    let _tris = decompose(&mut poly).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("convex_clip", n), &n, |b, &n| {
            b.iter_batched(
                || sample(n, false, 44),
                |mut poly| {
                    let _tris = clip_convex(&mut poly, None).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decompose);
criterion_main!(benches);
