//! Binary insertion and search over ordered vertex lists.
//!
//! The clipper and the decomposer keep small working lists of vertex ids
//! ordered by corner area (descending) or by angle surrogate (ascending).
//! Keys are read through a closure so the lists always rank the live cached
//! areas of the arena.

use crate::polygon::VertexId;

/// Insert `v` into `list`, kept in descending key order.
///
/// Binary search for the slot, O(n) shift. Equal keys insert at the first
/// position whose element does not exceed them.
pub fn insert_by_area<F>(area: F, list: &mut Vec<VertexId>, v: VertexId)
where
    F: Fn(VertexId) -> f64,
{
    let key = area(v);
    let mut s = 0usize;
    let mut e = list.len();
    if s == e {
        list.push(v);
        return;
    }
    while e - s > 1 {
        let i = s + (e - s) / 2;
        if key >= area(list[i]) {
            e = i;
        } else {
            s = i;
        }
    }
    if key >= area(list[s]) {
        list.insert(s, v);
    } else {
        list.insert(e, v);
    }
}

/// Insert `(v, graham)` into `list`, kept ascending by the angle surrogate.
pub fn insert_by_graham(list: &mut Vec<(VertexId, f64)>, v: VertexId, graham: f64) {
    let mut s = 0usize;
    let mut e = list.len();
    if s == e {
        list.push((v, graham));
        return;
    }
    while e - s > 1 {
        let i = s + (e - s) / 2;
        if graham <= list[i].1 {
            e = i;
        } else {
            s = i;
        }
    }
    if graham <= list[s].1 {
        list.insert(s, (v, graham));
    } else {
        list.insert(e, (v, graham));
    }
}

/// Pick the vertex whose corner area sits closest to the average ear area.
///
/// `list` is descending by area with at least 3 entries; `total` is the
/// remaining loop area, so `total / (len - 2)` is the ideal ear size if the
/// rest clips evenly. Closeness compares the ratios `smaller/target` vs
/// `target/larger`. Additional rule: when the single largest entry already
/// exceeds the target, the second largest is returned instead.
pub fn search_avg_area<F>(area: F, list: &[VertexId], total: f64) -> VertexId
where
    F: Fn(VertexId) -> f64,
{
    let mut s = 0usize;
    let mut e = list.len();
    let value = total / (e as f64 - 2.0);
    while e - s > 1 {
        let i = s + (e - s) / 2;
        if value <= area(list[i]) {
            s = i;
        } else {
            e = i;
        }
    }
    if e == list.len() || area(list[s]) / value < value / area(list[e]) {
        if s == 0 && area(list[0]) > value {
            return list[1];
        }
        return list[s];
    }
    list[e]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn key(areas: &[f64]) -> impl Fn(VertexId) -> f64 + '_ {
        move |v: VertexId| areas[v.0]
    }

    #[test]
    fn insert_by_area_keeps_descending_order() {
        let areas = [3.0, 7.0, 1.0, 7.0, 4.0, 0.5];
        let mut list = Vec::new();
        for i in 0..areas.len() {
            insert_by_area(key(&areas), &mut list, VertexId(i));
        }
        let ranked: Vec<f64> = list.iter().map(|&v| areas[v.0]).collect();
        assert_eq!(ranked, vec![7.0, 7.0, 4.0, 3.0, 1.0, 0.5]);
    }

    #[test]
    fn insert_by_graham_keeps_ascending_order() {
        let mut list = Vec::new();
        for (i, g) in [0.4, -0.9, 0.1, -0.9, 0.99].into_iter().enumerate() {
            insert_by_graham(&mut list, VertexId(i), g);
        }
        let ranked: Vec<f64> = list.iter().map(|&(_, g)| g).collect();
        assert_eq!(ranked, vec![-0.9, -0.9, 0.1, 0.4, 0.99]);
    }

    #[test]
    fn search_prefers_closest_below_target() {
        // Target 27/3 = 9: area 8 wins over 10 via the second-largest rule.
        let areas = [10.0, 8.0, 5.0, 3.0, 1.0];
        let list: Vec<VertexId> = (0..5).map(VertexId).collect();
        assert_eq!(search_avg_area(key(&areas), &list, 27.0), VertexId(1));
    }

    #[test]
    fn search_keeps_largest_when_it_does_not_exceed_target() {
        // Target 60/3 = 20 exceeds every area: the largest is closest and the
        // additional rule does not fire.
        let areas = [10.0, 8.0, 5.0, 3.0, 1.0];
        let list: Vec<VertexId> = (0..5).map(VertexId).collect();
        assert_eq!(search_avg_area(key(&areas), &list, 60.0), VertexId(0));
    }

    #[test]
    fn search_picks_interior_and_lower_neighbours() {
        let areas = [10.0, 8.0, 5.0, 3.0, 1.0];
        let list: Vec<VertexId> = (0..5).map(VertexId).collect();
        // Target 21/3 = 7: between 8 and 5, ratio favours 8.
        assert_eq!(search_avg_area(key(&areas), &list, 21.0), VertexId(1));
        // Target 9.6/3 = 3.2: between 5 and 3, ratio favours 3.
        assert_eq!(search_avg_area(key(&areas), &list, 9.6), VertexId(3));
    }

    #[test]
    fn search_on_three_entries_targets_the_whole_total() {
        let areas = [4.0, 3.0, 2.0];
        let list: Vec<VertexId> = (0..3).map(VertexId).collect();
        // Target = total = 3.5: 4 exceeds it and is the single largest, so
        // the second largest is returned.
        assert_eq!(search_avg_area(key(&areas), &list, 3.5), VertexId(1));
    }

    proptest! {
        #[test]
        fn insert_by_area_is_sorted_for_any_sequence(
            areas in proptest::collection::vec(-100.0f64..100.0, 1..40)
        ) {
            let mut list = Vec::new();
            for i in 0..areas.len() {
                insert_by_area(key(&areas), &mut list, VertexId(i));
            }
            prop_assert_eq!(list.len(), areas.len());
            for w in list.windows(2) {
                prop_assert!(areas[w[0].0] >= areas[w[1].0]);
            }
        }

        #[test]
        fn insert_by_graham_is_sorted_for_any_sequence(
            angles in proptest::collection::vec(-1.0f64..1.0, 1..40)
        ) {
            let mut list = Vec::new();
            for (i, &g) in angles.iter().enumerate() {
                insert_by_graham(&mut list, VertexId(i), g);
            }
            prop_assert_eq!(list.len(), angles.len());
            for w in list.windows(2) {
                prop_assert!(w[0].1 <= w[1].1);
            }
        }
    }
}
