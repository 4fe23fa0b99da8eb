//! Graham decomposition of simple 2D polygons.
//!
//! Decomposes an arbitrary simple polygon, possibly concave, into a
//! triangulation or into convex sub-polygons. Concave contours are sliced
//! recursively: each step isolates a convex (or smaller concave) sub-loop at
//! a reflex pivot, convex pieces are triangulated by average-area ear
//! clipping, and the shared link structure is restored before returning.
//!
//! The contour lives in a vertex arena (`Polygon`); `next`/`prev` links are
//! arena indices, so sub-loops can be relinked and restored with plain index
//! writes while every recursion level shares the same structure.

pub mod decomp;
pub mod earclip;
pub mod error;
pub mod polygon;
pub mod sorted;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use decomp::{decompose, decompose_convex};
pub use earclip::clip_convex;
pub use error::PolygonError;
pub use nalgebra::Vector2 as Vec2;
pub use polygon::{Polygon, Triangle, VertexId};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::decomp::{decompose, decompose_convex};
    pub use crate::earclip::clip_convex;
    pub use crate::error::PolygonError;
    pub use crate::polygon::rand::{
        draw_polygon_radial, RadialCfg, ReplayToken, VertexCount,
    };
    pub use crate::polygon::{Polygon, Triangle, VertexId};
    pub use nalgebra::Vector2 as Vec2;
}

/// Signed area of the parallelogram spanned by vectors `a` and `b` in R².
/// Positive for a→b counterclockwise, negative otherwise.
#[inline]
pub fn cross(a: nalgebra::Vector2<f64>, b: nalgebra::Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Monotone surrogate for the angle between `a` and `b`: minus the cosine.
///
/// Strictly increasing in the true angle over [0°, 180°]; compared, never
/// read as an angle value. Fails with `DegenerateGeometry` when either
/// vector has zero (or non-finite) length.
pub fn graham_angle(
    a: nalgebra::Vector2<f64>,
    b: nalgebra::Vector2<f64>,
) -> Result<f64, PolygonError> {
    let na = a.norm();
    let nb = b.norm();
    if !na.is_finite() || na <= 0.0 || !nb.is_finite() || nb <= 0.0 {
        return Err(PolygonError::DegenerateGeometry);
    }
    Ok(-(a.dot(&b) / (na * nb)))
}
