//! Polygon data structures: vertex arena, reflex index, triangles.
//!
//! Purpose
//! - Hold the contour as a circular doubly-linked list whose links are arena
//!   indices (`VertexId`), so the decomposer can temporarily relink sub-loops
//!   and restore them with plain index writes.
//! - Cache the signed corner area per vertex; a negative corner is reflex.
//!   The cache must be refreshed via `update_area` immediately after any
//!   relink of a vertex's neighbours.
//!
//! Invariants (quiescent state, i.e. before/after a full decomposition)
//! - `next`/`prev` form a single circular traversal over all vertices.
//! - The reflex index holds exactly the vertices with negative corner area,
//!   in traversal order.
//! - `reset()` is the sole recovery operation: it rebuilds links in
//!   construction order and recomputes all areas and the reflex index.

pub mod rand;

use nalgebra::Vector2;

use crate::cross;
use crate::error::PolygonError;

/// Stable arena index of a vertex within its `Polygon`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexId(pub usize);

/// Contour vertex: position, cached signed corner area, and cyclic links.
#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    pub pos: Vector2<f64>,
    /// Signed corner area `cross(prev - pos, next - pos) / 2`; negative for
    /// a reflex corner.
    pub area: f64,
    prev: VertexId,
    next: VertexId,
}

/// Triangle emitted by the clipper; positions are captured at clip time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub a: Vector2<f64>,
    pub b: Vector2<f64>,
    pub c: Vector2<f64>,
}

impl Triangle {
    /// Unsigned area.
    #[inline]
    pub fn area(&self) -> f64 {
        cross(self.b - self.a, self.c - self.a).abs() / 2.0
    }
}

/// Simple polygon over a vertex arena.
///
/// Vertex order is fixed at construction (used for snapshots and `reset`);
/// topology lives only in the `next`/`prev` links. The winding is normalized
/// at construction so convex corners carry positive area, whichever order
/// the caller supplied.
#[derive(Clone, Debug)]
pub struct Polygon {
    verts: Vec<Vertex>,
    reflex: Vec<VertexId>,
    area: f64,
}

impl Polygon {
    /// Build a polygon from an ordered point sequence.
    ///
    /// Fails with `InvalidPolygon` for fewer than 3 points.
    pub fn new(points: &[Vector2<f64>]) -> Result<Self, PolygonError> {
        if points.len() < 3 {
            return Err(PolygonError::InvalidPolygon {
                reason: "fewer than 3 points",
            });
        }
        let mut pts = points.to_vec();
        // Corner signs assume the winding whose shoelace sum is positive;
        // accept either input order by reversing when needed.
        let n = pts.len();
        let mut signed = 0.0;
        for i in 0..n {
            let p = pts[(i + n - 1) % n];
            let q = pts[i];
            signed += (p.x + q.x) * (p.y - q.y);
        }
        if signed < 0.0 {
            pts.reverse();
        }
        let verts = pts
            .into_iter()
            .enumerate()
            .map(|(i, pos)| Vertex {
                pos,
                area: 0.0,
                prev: VertexId((i + n - 1) % n),
                next: VertexId((i + 1) % n),
            })
            .collect();
        let mut poly = Self {
            verts,
            reflex: Vec::new(),
            area: 0.0,
        };
        poly.reset();
        Ok(poly)
    }

    /// Number of vertices in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    #[inline]
    pub fn pos(&self, v: VertexId) -> Vector2<f64> {
        self.verts[v.0].pos
    }

    /// Cached signed corner area of `v`.
    #[inline]
    pub fn corner_area(&self, v: VertexId) -> f64 {
        self.verts[v.0].area
    }

    #[inline]
    pub fn next(&self, v: VertexId) -> VertexId {
        self.verts[v.0].next
    }

    #[inline]
    pub fn prev(&self, v: VertexId) -> VertexId {
        self.verts[v.0].prev
    }

    #[inline]
    pub fn is_reflex(&self, v: VertexId) -> bool {
        self.verts[v.0].area < 0.0
    }

    /// Reflex vertices in traversal order.
    #[inline]
    pub fn reflex(&self) -> &[VertexId] {
        &self.reflex
    }

    /// Unsigned area of the whole contour (shoelace over construction order).
    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Positions in construction order.
    pub fn points(&self) -> Vec<Vector2<f64>> {
        self.verts.iter().map(|v| v.pos).collect()
    }

    /// Move a vertex. Leaves cached areas and the reflex index stale; call
    /// `reset()` before decomposing again.
    pub fn set_pos(&mut self, v: VertexId, pos: Vector2<f64>) {
        self.verts[v.0].pos = pos;
    }

    #[inline]
    pub(crate) fn set_next(&mut self, v: VertexId, next: VertexId) {
        self.verts[v.0].next = next;
    }

    #[inline]
    pub(crate) fn set_prev(&mut self, v: VertexId, prev: VertexId) {
        self.verts[v.0].prev = prev;
    }

    fn corner_area_of(&self, v: VertexId) -> f64 {
        let p = self.verts[self.verts[v.0].prev.0].pos;
        let q = self.verts[v.0].pos;
        let r = self.verts[self.verts[v.0].next.0].pos;
        cross(p - q, r - q) / 2.0
    }

    /// Recompute the cached corner area of `v` from its current neighbours.
    #[inline]
    pub fn update_area(&mut self, v: VertexId) {
        self.verts[v.0].area = self.corner_area_of(v);
    }

    /// Shoelace contribution of the edge `prev(v) -> v` under current links.
    #[inline]
    pub(crate) fn shoelace_term(&self, v: VertexId) -> f64 {
        let p = self.verts[self.verts[v.0].prev.0].pos;
        let q = self.verts[v.0].pos;
        (p.x + q.x) * (p.y - q.y)
    }

    /// Re-establish construction-order links, then recompute the total area,
    /// all corner areas, and the reflex index from scratch.
    pub fn reset(&mut self) {
        let n = self.verts.len();
        for i in 0..n {
            self.verts[i].prev = VertexId((i + n - 1) % n);
            self.verts[i].next = VertexId((i + 1) % n);
        }
        let mut area = 0.0;
        for i in 0..n {
            area += self.shoelace_term(VertexId(i));
        }
        self.area = area.abs() / 2.0;
        self.reflex.clear();
        for i in 0..n {
            self.update_area(VertexId(i));
            if self.verts[i].area < 0.0 {
                self.reflex.push(VertexId(i));
            }
        }
    }

    /// Snapshot the loop reachable from `start` via `next` as a new,
    /// independent polygon.
    ///
    /// Fails with `InvalidPolygon` if the loop does not close over at least
    /// 3 vertices within the arena size.
    pub fn subpolygon(&self, start: VertexId) -> Result<Polygon, PolygonError> {
        let mut points = Vec::new();
        let mut it = start;
        loop {
            points.push(self.pos(it));
            if points.len() > self.verts.len() {
                return Err(PolygonError::InvalidPolygon {
                    reason: "link structure is not a closed loop",
                });
            }
            it = self.next(it);
            if it == start {
                break;
            }
        }
        Polygon::new(&points)
    }

    /// Drop `v` from the reflex index.
    pub(crate) fn remove_reflex(&mut self, v: VertexId) {
        self.reflex.retain(|&x| x != v);
    }

    /// Drop the section of the reflex index covered by a concave slice,
    /// keeping `pivot`/`slice` themselves only while their corners stay
    /// reflex (zero counts as convex).
    pub(crate) fn remove_reflex_span(&mut self, pivot: VertexId, slice: VertexId) {
        let mut i_pivot = index_of(&self.reflex, pivot);
        let mut i_slice = index_of(&self.reflex, slice);
        if i_pivot < i_slice {
            if self.corner_area(pivot) < 0.0 {
                i_pivot += 1;
            }
            if self.corner_area(slice) >= 0.0 {
                i_slice += 1;
            }
            self.reflex.drain(i_pivot..i_slice);
        } else {
            if self.corner_area(pivot) < 0.0 {
                i_pivot += 1;
            }
            if self.corner_area(slice) >= 0.0 {
                i_slice += 1;
            }
            self.reflex = self.reflex[i_slice..i_pivot].to_vec();
        }
    }

    /// Check the quiescent-state invariants: a single closed traversal with
    /// consistent back-links, fresh corner areas, and a reflex index that
    /// matches the corner signs in traversal order.
    pub fn validate(&self) -> Result<(), PolygonError> {
        let n = self.verts.len();
        if n < 3 {
            return Err(PolygonError::InvalidPolygon {
                reason: "fewer than 3 linked vertices",
            });
        }
        let mut seen = vec![false; n];
        let mut traversal_reflex = Vec::new();
        let mut it = VertexId(0);
        for _ in 0..n {
            if seen[it.0] {
                return Err(PolygonError::InvalidPolygon {
                    reason: "traversal revisits a vertex",
                });
            }
            seen[it.0] = true;
            let next = self.next(it);
            if self.prev(next) != it {
                return Err(PolygonError::InvalidPolygon {
                    reason: "prev/next links disagree",
                });
            }
            if self.corner_area(it) != self.corner_area_of(it) {
                return Err(PolygonError::InvalidPolygon {
                    reason: "cached corner area is stale",
                });
            }
            if self.corner_area(it) < 0.0 {
                traversal_reflex.push(it);
            }
            it = next;
        }
        if it != VertexId(0) {
            return Err(PolygonError::InvalidPolygon {
                reason: "traversal does not close",
            });
        }
        if traversal_reflex.len() != self.reflex.len() {
            return Err(PolygonError::InvalidPolygon {
                reason: "reflex index does not match corner signs",
            });
        }
        if !traversal_reflex.is_empty() {
            // Same cyclic order, any starting point.
            let anchor = self.reflex[0];
            let offset = traversal_reflex
                .iter()
                .position(|&v| v == anchor)
                .ok_or(PolygonError::InvalidPolygon {
                    reason: "reflex index does not match corner signs",
                })?;
            let m = traversal_reflex.len();
            for k in 0..m {
                if traversal_reflex[(offset + k) % m] != self.reflex[k] {
                    return Err(PolygonError::InvalidPolygon {
                        reason: "reflex index out of traversal order",
                    });
                }
            }
        }
        Ok(())
    }
}

/// Position of `v` in an id list; the decomposer only looks up ids it keeps
/// tracked in the list it scans.
pub(crate) fn index_of(list: &[VertexId], v: VertexId) -> usize {
    list.iter()
        .position(|&x| x == v)
        .expect("vertex tracked in reflex list")
}

#[cfg(test)]
mod tests;
