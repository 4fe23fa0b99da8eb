//! Recursive Graham decomposition of concave polygons.
//!
//! Purpose
//! - Split a simple, possibly concave contour into convex pieces: each step
//!   anchors at a reflex `pivot`, sweeps forward to find the `slice` vertex
//!   closing the next sub-loop, temporarily relinks the contour to isolate
//!   that loop, hands convex loops to the ear clipper, and recurses on
//!   concave remainders.
//!
//! State contract
//! - The polygon's links and reflex index are shared mutable scratch for the
//!   whole recursion tree. Every level restores the segment it relinked
//!   before returning, and the depth-0 call finishes with `reset()`, so the
//!   polygon leaves a decomposition exactly as it entered.
//! - Recursion depth is bounded by the number of reflex vertices; there is
//!   no explicit guard.

use crate::earclip::clip_convex;
use crate::error::PolygonError;
use crate::polygon::{index_of, Polygon, Triangle, VertexId};
use crate::sorted;
use crate::{cross, graham_angle};

/// Decompose `poly` into triangles.
///
/// Returns exactly n-2 triangles for an n-vertex polygon, covering it
/// without gaps or overlaps. The polygon is mutated during the run and
/// restored via `reset()` before returning. On `DegenerateGeometry` (only
/// reachable for self-touching contours) the polygon may be left
/// mid-relink; `reset()` recovers it.
pub fn decompose(poly: &mut Polygon) -> Result<Vec<Triangle>, PolygonError> {
    poly.validate()?;
    let mut out = Output::Triangles(Vec::new());
    decompose_segment(poly, &mut out, None, None, 0)?;
    match out {
        Output::Triangles(triangles) => Ok(triangles),
        Output::Polygons(_) => unreachable!(),
    }
}

/// Decompose `poly` into convex sub-polygons (snapshots, ordered as they
/// are sliced off). A convex input yields a single-element result.
pub fn decompose_convex(poly: &mut Polygon) -> Result<Vec<Polygon>, PolygonError> {
    poly.validate()?;
    let mut out = Output::Polygons(Vec::new());
    decompose_segment(poly, &mut out, None, None, 0)?;
    match out {
        Output::Polygons(polygons) => Ok(polygons),
        Output::Triangles(_) => unreachable!(),
    }
}

/// Collector for the two output modes; both modes share one recursion.
enum Output {
    Triangles(Vec<Triangle>),
    Polygons(Vec<Polygon>),
}

impl Output {
    /// Consume the convex loop starting at `start`: clip it into triangles,
    /// or snapshot it as an independent polygon.
    fn collect(&mut self, poly: &mut Polygon, start: VertexId) -> Result<(), PolygonError> {
        match self {
            Output::Triangles(triangles) => {
                triangles.extend(clip_convex(poly, Some(start))?);
            }
            Output::Polygons(polygons) => {
                polygons.push(poly.subpolygon(start)?);
            }
        }
        Ok(())
    }
}

/// One recursion level over the contour segment from `pivot` backward to
/// `root` (full cycle when `root` is `None`).
fn decompose_segment(
    poly: &mut Polygon,
    out: &mut Output,
    pivot: Option<VertexId>,
    root: Option<VertexId>,
    depth: usize,
) -> Result<(), PolygonError> {
    // Convex already: clip the whole contour.
    if poly.reflex().is_empty() {
        if depth == 0 {
            poly.reset();
        }
        out.collect(poly, VertexId(0))?;
        if depth == 0 {
            poly.reset();
        }
        return Ok(());
    }

    let mut pivot = pivot.unwrap_or(poly.reflex()[0]);

    // Reflex vertices of this segment, oldest-to-pivot order: walk the
    // global reflex index backwards from `pivot` until `root` (or all the
    // way around).
    let mut reflexes: Vec<VertexId> = Vec::new();
    let mut it = pivot;
    loop {
        if Some(it) == root {
            break;
        }
        reflexes.insert(0, it);
        let len = poly.reflex().len();
        let i = index_of(poly.reflex(), it);
        it = poly.reflex()[(i + len - 1) % len];
        if it == pivot {
            break;
        }
    }

    while !reflexes.is_empty() {
        // A reflex successor invalidates the pivot edge; advance and retry.
        if poly.corner_area(poly.next(pivot)) < 0.0 {
            pivot = poly.next(pivot);
            continue;
        }

        let pivot_edge = poly.pos(poly.next(pivot)) - poly.pos(pivot);

        // Candidate reflex vertices on the inner side of the pivot edge,
        // ranked ascending by angle surrogate.
        let mut in_reflexes: Vec<(VertexId, f64)> = Vec::new();
        if reflexes.len() > 1 {
            let mut it = pivot;
            loop {
                it = reflexes[(index_of(&reflexes, it) + 1) % reflexes.len()];
                let reflex_diag = poly.pos(it) - poly.pos(pivot);
                if cross(pivot_edge, reflex_diag) < 0.0 {
                    let graham = graham_angle(pivot_edge, reflex_diag)?;
                    sorted::insert_by_graham(&mut in_reflexes, it, graham);
                }
                if it == pivot {
                    break;
                }
            }
        }

        // Sweep forward from the pivot edge for the vertex closing the next
        // sub-loop: convex closure past 180° or at a reflex vertex, concave
        // closure at the best-ranked candidate once it beats the sweep's
        // own diagonal.
        let mut it = pivot;
        let (slice, convex) = loop {
            it = poly.next(it);
            let diag = poly.pos(poly.next(it)) - poly.pos(pivot);
            if cross(pivot_edge, diag) > 0.0 || poly.corner_area(it) < 0.0 {
                break (it, true);
            }
            let graham = graham_angle(diag, pivot_edge)?;
            // Prune candidates that fell outside the edge it -> it.next.
            let edge = poly.pos(poly.next(it)) - poly.pos(it);
            let base = poly.pos(it);
            in_reflexes.retain(|&(r, _)| cross(edge, poly.pos(r) - base) < 0.0);
            if let Some(&(candidate, angle)) = in_reflexes.first() {
                if angle < graham {
                    break (candidate, false);
                }
            }
        };

        // Close the sub-loop pivot..slice; remember the outer neighbours
        // and corner signs for the restore.
        let old_prev = poly.prev(pivot);
        let old_next = poly.next(slice);
        let pivot_was_reflex = poly.corner_area(pivot) < 0.0;
        let slice_was_reflex = poly.corner_area(slice) < 0.0;

        poly.set_prev(pivot, slice);
        poly.set_next(slice, pivot);
        poly.update_area(pivot);
        poly.update_area(slice);

        let mut r_pivot: Option<VertexId> = None;

        if convex {
            out.collect(poly, pivot)?;
        } else {
            // Bridge it -> slice so the loop pivot..it..slice closes, clip
            // it, then rewire to the residual loop slice -> it -> it.next.
            let it_next = poly.next(it);
            poly.set_next(it, slice);
            let slice_prev = poly.prev(slice);
            poly.set_prev(slice, it);
            out.collect(poly, pivot)?;
            poly.set_next(it, it_next);
            poly.set_prev(it, slice);
            poly.set_next(slice, it);
            poly.set_prev(slice, slice_prev);
            poly.update_area(slice);
            poly.update_area(it);

            // Recursion target for the residual: the slice itself while it
            // stays reflex, otherwise the reflex vertex preceding it.
            if poly.corner_area(slice) < 0.0 {
                r_pivot = Some(slice);
            } else {
                let i = index_of(&reflexes, slice);
                let candidate = reflexes[(i + reflexes.len() - 1) % reflexes.len()];
                if candidate != pivot {
                    r_pivot = Some(candidate);
                }
            }
            match r_pivot {
                Some(rp) => decompose_segment(poly, out, Some(rp), Some(pivot), depth + 1)?,
                // No concavity left on this branch: the residual is convex.
                None => out.collect(poly, slice)?,
            }
        }

        // Reattach the outer contour across the new pivot -> slice edge.
        poly.set_prev(pivot, old_prev);
        poly.set_next(slice, old_next);
        poly.set_next(pivot, slice);
        poly.set_prev(slice, pivot);
        poly.update_area(pivot);
        poly.update_area(slice);

        // Reflex bookkeeping: drop vertices whose corners became
        // non-negative (zero counts as convex) and advance to the next
        // surviving reflex vertex in cyclic order.
        let new_pivot;
        if convex {
            if slice_was_reflex && poly.corner_area(slice) >= 0.0 {
                reflexes.retain(|&x| x != slice);
                poly.remove_reflex(slice);
            }
            new_pivot = reflexes[(index_of(&reflexes, pivot) + 1) % reflexes.len()];
            if pivot_was_reflex && poly.corner_area(pivot) >= 0.0 {
                reflexes.retain(|&x| x != pivot);
                poly.remove_reflex(pivot);
            }
        } else {
            new_pivot = reflexes[(index_of(&reflexes, slice) + 1) % reflexes.len()];
            // Drop the section of the local list covered by the slice.
            let mut i_pivot = index_of(&reflexes, pivot);
            let mut i_slice = index_of(&reflexes, slice);
            if i_pivot < i_slice {
                if poly.corner_area(pivot) < 0.0 {
                    i_pivot += 1;
                }
                if poly.corner_area(slice) >= 0.0 {
                    i_slice += 1;
                }
                reflexes.drain(i_pivot..i_slice);
            } else {
                if poly.corner_area(pivot) < 0.0 {
                    i_pivot += 1;
                }
                if poly.corner_area(slice) >= 0.0 {
                    i_slice += 1;
                }
                reflexes = reflexes[i_slice..i_pivot].to_vec();
            }
            // The global index drops the same section once the whole branch
            // is resolved at the top level.
            if depth == 0 && r_pivot.is_none() {
                poly.remove_reflex_span(pivot, slice);
            }
        }

        // Segment exhausted once the cycle returns to a now-convex pivot.
        if new_pivot == pivot && poly.corner_area(pivot) >= 0.0 {
            reflexes.clear();
        } else {
            pivot = new_pivot;
        }
    }

    // No reflex vertex left on this segment: clip the remaining contour.
    out.collect(poly, pivot)?;
    if depth == 0 {
        poly.reset();
    }
    Ok(())
}
