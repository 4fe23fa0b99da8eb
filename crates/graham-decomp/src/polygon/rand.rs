//! Random simple polygons (radial jitter + replay tokens).
//!
//! Purpose
//! - Provide a small, deterministic sampler for simple polygons used by
//!   tests, benches, and the demo driver. The radial model emits a
//!   star-shaped outline: strictly increasing angles keep it simple, while
//!   radial jitter makes it concave as soon as the amplitude is non-trivial.
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular and
//!   radial jitter, and connect the points in angular order.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Polygon;
use crate::error::PolygonError;

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to
    /// [0, 0.49] so consecutive angles stay strictly increasing.
    pub angle_jitter_frac: f64,
    /// Radial jitter (relative amplitude). Radii = `base_radius * (1 + u)`
    /// with `u ∈ [-radial_jitter, radial_jitter]`; clamped to [0, 0.95] so
    /// radii stay positive.
    pub radial_jitter: f64,
    /// Base radius of the outline.
    pub base_radius: f64,
    /// Random global phase in [0, 2π)?
    pub random_phase: bool,
}
impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.45,
            base_radius: 1.0,
            random_phase: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random simple polygon via radial jitter.
///
/// The outline is star-shaped around the origin, so it is always simple;
/// with the default jitter roughly every third corner comes out reflex.
pub fn draw_polygon_radial(cfg: RadialCfg, tok: ReplayToken) -> Result<Polygon, PolygonError> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng).max(3);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.95);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = 2.0 * std::f64::consts::PI / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * 2.0 * std::f64::consts::PI
    } else {
        0.0
    };
    let mut points = Vec::with_capacity(n);
    for k in 0..n {
        let base = phase + (k as f64) * delta;
        let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
        let theta = base + jitter;
        let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
        let r = r0 * (1.0 + u);
        points.push(Vector2::new(r * theta.cos(), r * theta.sin()));
    }
    Polygon::new(&points)
}
