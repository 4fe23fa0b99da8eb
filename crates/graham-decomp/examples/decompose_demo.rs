//! Decompose a few named shapes and print triangle counts and area sums.
//!
//! Usage:
//!   cargo run -p graham-decomp --example decompose_demo -- [square|lshape|star]

use graham_decomp::prelude::*;

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "star".to_string());
    let points = match mode.as_str() {
        "square" => vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
        ],
        "lshape" => vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(2.0, 4.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
        ],
        "star" => {
            let cfg = RadialCfg {
                vertex_count: VertexCount::Fixed(16),
                ..RadialCfg::default()
            };
            let poly = draw_polygon_radial(cfg, ReplayToken { seed: 2026, index: 0 })
                .expect("sampler yields at least 3 points");
            poly.points()
        }
        _ => {
            eprintln!("usage: decompose_demo [square|lshape|star]");
            return;
        }
    };

    let mut poly = Polygon::new(&points).expect("demo shapes are valid");
    println!(
        "{mode}: {} vertices, {} reflex, area {:.4}",
        poly.len(),
        poly.reflex().len(),
        poly.area()
    );

    let triangles = decompose(&mut poly).expect("demo shapes decompose");
    let sum: f64 = triangles.iter().map(Triangle::area).sum();
    println!("triangulate: {} triangles, area sum {:.4}", triangles.len(), sum);
    for (i, t) in triangles.iter().enumerate() {
        println!(
            "  tri {i}: ({:.2},{:.2}) ({:.2},{:.2}) ({:.2},{:.2})",
            t.a.x, t.a.y, t.b.x, t.b.y, t.c.x, t.c.y
        );
    }

    let subs = decompose_convex(&mut poly).expect("demo shapes decompose");
    println!("convex pieces: {}", subs.len());
    for (i, sub) in subs.iter().enumerate() {
        println!("  piece {i}: {} vertices, area {:.4}", sub.len(), sub.area());
    }
}
