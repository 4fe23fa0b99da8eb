use super::*;
use nalgebra::Vector2;

fn v(x: f64, y: f64) -> Vector2<f64> {
    Vector2::new(x, y)
}

/// Unit-square-grid L-shape with a single reflex corner at (2,2).
fn lshape() -> Vec<Vector2<f64>> {
    vec![
        v(0.0, 0.0),
        v(4.0, 0.0),
        v(4.0, 4.0),
        v(2.0, 4.0),
        v(2.0, 2.0),
        v(0.0, 2.0),
    ]
}

/// Plus-sign contour: 12 vertices, 4 reflex corners, area 5.
fn plus_sign() -> Vec<Vector2<f64>> {
    vec![
        v(1.0, 0.0),
        v(2.0, 0.0),
        v(2.0, 1.0),
        v(3.0, 1.0),
        v(3.0, 2.0),
        v(2.0, 2.0),
        v(2.0, 3.0),
        v(1.0, 3.0),
        v(1.0, 2.0),
        v(0.0, 2.0),
        v(0.0, 1.0),
        v(1.0, 1.0),
    ]
}

#[test]
fn rejects_fewer_than_three_points() {
    for pts in [vec![], vec![v(0.0, 0.0)], vec![v(0.0, 0.0), v(1.0, 0.0)]] {
        assert!(matches!(
            Polygon::new(&pts),
            Err(PolygonError::InvalidPolygon { .. })
        ));
    }
}

#[test]
fn square_is_convex_under_either_winding() {
    let ccw = [v(0.0, 0.0), v(4.0, 0.0), v(4.0, 4.0), v(0.0, 4.0)];
    let cw = [v(0.0, 0.0), v(0.0, 4.0), v(4.0, 4.0), v(4.0, 0.0)];
    for pts in [ccw, cw] {
        let poly = Polygon::new(&pts).unwrap();
        assert!(poly.reflex().is_empty());
        assert_eq!(poly.area(), 16.0);
        for i in 0..4 {
            assert!(poly.corner_area(VertexId(i)) > 0.0);
        }
        poly.validate().unwrap();
    }
}

#[test]
fn reflex_index_follows_traversal_order() {
    let poly = Polygon::new(&plus_sign()).unwrap();
    assert_eq!(poly.reflex().len(), 4);
    for &r in poly.reflex() {
        assert!(poly.is_reflex(r));
    }
    // Traversal order: walking `next` from any reflex vertex visits the
    // reflex index in sequence.
    let mut it = poly.reflex()[0];
    let mut seen = Vec::new();
    for _ in 0..poly.len() {
        if poly.is_reflex(it) {
            seen.push(it);
        }
        it = poly.next(it);
    }
    assert_eq!(seen, poly.reflex());
    assert_eq!(poly.area(), 5.0);
}

#[test]
fn lshape_has_one_reflex_corner() {
    let poly = Polygon::new(&lshape()).unwrap();
    assert_eq!(poly.reflex().len(), 1);
    let r = poly.reflex()[0];
    assert_eq!(poly.pos(r), v(2.0, 2.0));
    assert_eq!(poly.area(), 12.0);
}

#[test]
fn triangle_corner_areas_equal_full_area() {
    let poly = Polygon::new(&[v(0.0, 0.0), v(2.0, 0.0), v(0.0, 2.0)]).unwrap();
    for i in 0..3 {
        assert_eq!(poly.corner_area(VertexId(i)), 2.0);
    }
    assert_eq!(poly.area(), 2.0);
}

#[test]
fn reset_recovers_from_relinks() {
    let mut poly = Polygon::new(&lshape()).unwrap();
    let before: Vec<_> = (0..poly.len())
        .map(|i| (poly.next(VertexId(i)), poly.prev(VertexId(i)), poly.corner_area(VertexId(i))))
        .collect();
    // Bypass a vertex, as the clipper does.
    let a = VertexId(1);
    let p = poly.prev(a);
    let n = poly.next(a);
    poly.set_next(p, n);
    poly.set_prev(n, p);
    poly.update_area(p);
    poly.update_area(n);
    assert!(poly.validate().is_err());

    poly.reset();
    let after: Vec<_> = (0..poly.len())
        .map(|i| (poly.next(VertexId(i)), poly.prev(VertexId(i)), poly.corner_area(VertexId(i))))
        .collect();
    assert_eq!(before, after);
    poly.validate().unwrap();
}

#[test]
fn reset_after_position_edit_rebuilds_reflex_index() {
    // Positive winding as supplied, so ids keep the construction order.
    let mut poly = Polygon::new(&[v(0.0, 0.0), v(0.0, 4.0), v(4.0, 4.0), v(4.0, 0.0)]).unwrap();
    assert!(poly.reflex().is_empty());
    // Pull one corner inward: the square becomes a dart with a reflex
    // corner there.
    let edited = VertexId(2);
    poly.set_pos(edited, v(1.0, 2.0));
    assert!(poly.validate().is_err());
    poly.reset();
    poly.validate().unwrap();
    assert_eq!(poly.reflex().len(), 1);
    assert!(poly.is_reflex(edited));
}

#[test]
fn subpolygon_snapshots_are_independent() {
    let mut poly = Polygon::new(&lshape()).unwrap();
    let start = VertexId(2);
    let snap = poly.subpolygon(start).unwrap();
    assert_eq!(snap.len(), poly.len());
    assert_eq!(snap.area(), poly.area());
    // Rotated point sequence, same contour.
    assert_eq!(snap.points()[0], poly.pos(start));

    poly.set_pos(VertexId(2), v(10.0, 10.0));
    assert_ne!(snap.points()[0], poly.pos(VertexId(2)));
}

#[test]
fn subpolygon_rejects_unclosed_links() {
    let mut poly = Polygon::new(&lshape()).unwrap();
    // Short-circuit one link into a 2-cycle that never returns to start.
    poly.set_next(VertexId(2), VertexId(3));
    poly.set_next(VertexId(3), VertexId(2));
    assert!(matches!(
        poly.subpolygon(VertexId(0)),
        Err(PolygonError::InvalidPolygon { .. })
    ));
}

#[test]
fn validate_rejects_stale_areas_and_broken_links() {
    let good = Polygon::new(&plus_sign()).unwrap();
    good.validate().unwrap();

    let mut stale = good.clone();
    stale.set_pos(VertexId(0), v(0.5, 0.25));
    assert!(stale.validate().is_err());

    let mut broken = good.clone();
    let skip = broken.next(VertexId(0));
    broken.set_next(VertexId(0), broken.next(skip));
    assert!(broken.validate().is_err());
}
