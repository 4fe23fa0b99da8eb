//! Error types for polygon construction and decomposition.

use thiserror::Error;

/// Errors surfaced by the polygon structure and the decomposer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolygonError {
    /// Fewer than 3 points, or a link/area invariant is violated before
    /// decomposition begins.
    #[error("invalid polygon: {reason}")]
    InvalidPolygon {
        /// Which invariant failed.
        reason: &'static str,
    },

    /// Two adjacent contour points coincide, so an edge direction cannot be
    /// normalized.
    #[error("degenerate geometry: zero-length edge direction")]
    DegenerateGeometry,
}
