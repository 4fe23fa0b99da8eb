//! Average ear clipping for convex loops.
//!
//! Clips the ear whose corner area is closest to the mean remaining ear
//! size instead of a greedy extreme, which keeps the emitted triangles
//! close to uniform in area.

use crate::error::PolygonError;
use crate::polygon::{Polygon, Triangle, VertexId};
use crate::sorted;

/// Triangulate the convex loop reachable from `start` (arena head if
/// `None`) by average-area ear clipping.
///
/// Precondition: following `next` from `start` closes a loop of at least 3
/// vertices with no reflex corner. The decomposer guarantees this for the
/// sub-loops it isolates; a loop containing a reflex vertex produces
/// triangles outside the contour.
///
/// Emits exactly n-2 triangles for an n-vertex loop and unlinks every loop
/// vertex except the final three; vertices outside the loop are untouched.
pub fn clip_convex(
    poly: &mut Polygon,
    start: Option<VertexId>,
) -> Result<Vec<Triangle>, PolygonError> {
    let start = start.unwrap_or(VertexId(0));

    // Rank the loop by corner area (descending) while accumulating the loop
    // area via the shoelace sum.
    let mut areas = vec![start];
    let mut total = poly.shoelace_term(start);
    let mut it = poly.next(start);
    while it != start {
        if areas.len() > poly.len() {
            return Err(PolygonError::InvalidPolygon {
                reason: "link structure is not a closed loop",
            });
        }
        sorted::insert_by_area(|v| poly.corner_area(v), &mut areas, it);
        total += poly.shoelace_term(it);
        it = poly.next(it);
    }
    total /= 2.0;

    if areas.len() < 3 {
        return Err(PolygonError::InvalidPolygon {
            reason: "loop shorter than 3 vertices",
        });
    }

    let mut triangles = Vec::with_capacity(areas.len() - 2);
    loop {
        // Ear with corner area closest to the current average.
        let it = sorted::search_avg_area(|v| poly.corner_area(v), &areas, total);
        let prev = poly.prev(it);
        let next = poly.next(it);
        triangles.push(Triangle {
            a: poly.pos(prev),
            b: poly.pos(it),
            c: poly.pos(next),
        });

        // Clip: bypass the ear vertex and retire it from the ranking.
        poly.set_next(prev, next);
        poly.set_prev(next, prev);
        areas.retain(|&v| v != it);
        total -= poly.corner_area(it);

        poly.update_area(prev);
        poly.update_area(next);

        // Re-rank the two corners that changed.
        areas.retain(|&v| v != prev);
        sorted::insert_by_area(|v| poly.corner_area(v), &mut areas, prev);
        areas.retain(|&v| v != next);
        sorted::insert_by_area(|v| poly.corner_area(v), &mut areas, next);

        // The clipped vertex keeps its stale links: once its second
        // neighbour ahead equals its old `prev`, only a triangle remains.
        if poly.next(next) == prev {
            break;
        }
    }
    Ok(triangles)
}
