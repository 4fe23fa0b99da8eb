use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::SubscriberBuilder;

use graham_decomp::polygon::rand::{draw_polygon_radial, RadialCfg, ReplayToken, VertexCount};
use graham_decomp::{decompose, decompose_convex, Polygon, Vec2};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Polygon decomposition driver")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Triangulate a polygon read from a JSON list of [x, y] points
    Triangulate {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: Option<String>,
    },
    /// Split a polygon into convex sub-polygons
    Convex {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: Option<String>,
    },
    /// Generate a random simple polygon and write its point list
    Generate {
        #[arg(long, default_value_t = 12)]
        vertices: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: Option<String>,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Triangulate { input, out } => triangulate(input, out),
        Action::Convex { input, out } => convex(input, out),
        Action::Generate { vertices, seed, out } => generate(vertices, seed, out),
    }
}

fn read_polygon(input: &str) -> Result<Polygon> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("reading point list from {input}"))?;
    let pairs: Vec<[f64; 2]> =
        serde_json::from_str(&text).with_context(|| format!("parsing {input} as [[x,y],..]"))?;
    let points: Vec<Vec2<f64>> = pairs.iter().map(|p| Vec2::new(p[0], p[1])).collect();
    Polygon::new(&points).with_context(|| format!("building polygon from {input}"))
}

fn write_json(out: Option<String>, value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            let out_path = Path::new(&path);
            if let Some(parent) = out_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(out_path, text).with_context(|| format!("writing {path}"))?;
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn triangulate(input: String, out: Option<String>) -> Result<()> {
    let mut poly = read_polygon(&input)?;
    let started = Instant::now();
    let triangles = decompose(&mut poly)?;
    tracing::info!(
        input,
        vertices = poly.len(),
        reflex = poly.reflex().len(),
        triangles = triangles.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "triangulate"
    );
    let value = serde_json::json!(triangles
        .iter()
        .map(|t| [[t.a.x, t.a.y], [t.b.x, t.b.y], [t.c.x, t.c.y]])
        .collect::<Vec<_>>());
    write_json(out, &value)
}

fn convex(input: String, out: Option<String>) -> Result<()> {
    let mut poly = read_polygon(&input)?;
    let started = Instant::now();
    let subs = decompose_convex(&mut poly)?;
    tracing::info!(
        input,
        vertices = poly.len(),
        reflex = poly.reflex().len(),
        pieces = subs.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "convex"
    );
    let value = serde_json::json!(subs
        .iter()
        .map(|sub| {
            sub.points()
                .iter()
                .map(|p| [p.x, p.y])
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>());
    write_json(out, &value)
}

fn generate(vertices: usize, seed: u64, out: Option<String>) -> Result<()> {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Fixed(vertices),
        ..RadialCfg::default()
    };
    let poly = draw_polygon_radial(cfg, ReplayToken { seed, index: 0 })?;
    tracing::info!(vertices = poly.len(), reflex = poly.reflex().len(), seed, "generate");
    let value = serde_json::json!(poly
        .points()
        .iter()
        .map(|p| [p.x, p.y])
        .collect::<Vec<_>>());
    write_json(out, &value)
}
