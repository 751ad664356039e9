//! Nearest-neighbor with restarts.
//!
//! # Algorithm
//!
//! The start/end location joins the items as a pseudo-node that is entered at
//! the end point and left from the start point. For every origin (the
//! pseudo-node, then each item from each of its open sides) a greedy ring is
//! built over all nodes:
//!
//! ```text
//! origin -> nearest unvisited -> ... -> pseudo -> ... -> nearest unvisited
//! ```
//!
//! The ring is rotated to begin right after the pseudo-node, which yields an
//! item order. Every ring is evaluated with the route evaluator and the
//! shortest one is kept; the input order itself is the baseline to beat.
//!
//! # Complexity
//!
//! O(n³) oracle lookups for n items (O(n) rings of O(n²) each).

use log::debug;

use crate::error::Result;
use crate::evaluation::RouteEvaluator;
use crate::models::{Order, Point, Stop};
use crate::Warehouse;

/// Improves `order` by greedy nearest-neighbor rings from many origins.
///
/// `iteration_cap` limits how many origins are tried, in candidate order
/// (pseudo-node first, then items in input order). `None`, zero, or a cap at
/// or above the candidate count tries them all.
///
/// The returned order is a permutation of `order` and is never longer than
/// `order` itself.
///
/// # Examples
///
/// ```
/// use u_picking::constructive::nearest_neighbor_restarts;
/// use u_picking::distance::LayoutConfig;
/// use u_picking::evaluation::RouteEvaluator;
/// use u_picking::models::{Order, Point, Product};
/// use u_picking::Warehouse;
///
/// let wh = Warehouse::new(
///     LayoutConfig::default(),
///     (1..=5).map(|id| Product::from_shelf(id, 3 * id as i32, id as i32 % 3)),
/// )
/// .unwrap();
/// let order = Order::from_products(&[5, 1, 4, 2, 3], 0);
/// let origin = Point::new(0, 0);
/// let (best, len) = nearest_neighbor_restarts(&wh, &order, origin, origin, None).unwrap();
/// assert!(best.is_permutation_of(&order));
/// let before = RouteEvaluator::new(&wh).route_length(&order, origin, origin).unwrap();
/// assert!(len <= before);
/// ```
pub fn nearest_neighbor_restarts(
    warehouse: &Warehouse,
    order: &Order,
    start: Point,
    end: Point,
    iteration_cap: Option<usize>,
) -> Result<(Order, f64)> {
    warehouse.check_route(order, start, end)?;
    let stops = warehouse.stops(order)?;
    let evaluator = RouteEvaluator::new(warehouse);

    // Ring node 0 is the pseudo-node, node k + 1 is item k.
    let mut ring = Vec::with_capacity(stops.len() + 1);
    ring.push(Stop::Pseudo {
        entry: end,
        exit: start,
    });
    ring.extend(stops.iter().copied());

    let candidates = ring.len();
    let tries = match iteration_cap {
        Some(cap) if cap > 0 && cap < candidates => cap,
        _ => candidates,
    };

    let identity: Vec<usize> = (0..stops.len()).collect();
    let mut best_len = evaluator.sequence_length(&stops, &identity, start, end);
    let mut best_seq = identity;

    for (origin, from) in ring_origins(&ring, tries) {
        let seq = nearest_neighbor_ring(warehouse, &ring, origin, from);
        let len = evaluator.sequence_length(&stops, &seq, start, end);
        if len < best_len {
            debug!("nn restart: origin {origin} from {from} improves to {len:.3}");
            best_len = len;
            best_seq = seq;
        }
    }

    Ok((order.permuted(&best_seq), best_len))
}

/// `(origin, standing point)` pairs for the first `tries` ring nodes: one per
/// open side of a slot, one for the pseudo-node.
fn ring_origins(ring: &[Stop<'_>], tries: usize) -> Vec<(usize, Point)> {
    ring.iter()
        .take(tries)
        .enumerate()
        .flat_map(|(origin, stop)| {
            stop.departure_points()
                .into_iter()
                .map(move |from| (origin, from))
        })
        .collect()
}

/// Builds one greedy ring from `origin`, standing at `from`, and returns the
/// item indices in visiting order after the pseudo-node.
fn nearest_neighbor_ring(
    warehouse: &Warehouse,
    ring: &[Stop<'_>],
    origin: usize,
    from: Point,
) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..ring.len()).filter(|&k| k != origin).collect();
    let mut visited = Vec::with_capacity(ring.len());
    visited.push(origin);
    let mut pos = from;

    while !remaining.is_empty() {
        let mut best: Option<(usize, f64, Point)> = None;
        for (slot, &k) in remaining.iter().enumerate() {
            let dest = ring[k].find_dest(pos);
            let d = warehouse.distance(pos, dest);
            if best.map_or(true, |(_, bd, _)| d < bd) {
                best = Some((slot, d, ring[k].departure(dest)));
            }
        }
        let Some((slot, _, next)) = best else { break };
        visited.push(remaining.remove(slot));
        pos = next;
    }

    let anchor = visited.iter().position(|&k| k == 0).unwrap_or(0);
    visited.rotate_left(anchor);
    visited.into_iter().skip(1).map(|k| k - 1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::nearest_neighbor;
    use crate::distance::LayoutConfig;
    use crate::exact::brute_force;
    use crate::models::Product;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::OnceLock;

    fn warehouse() -> &'static Warehouse {
        static WH: OnceLock<Warehouse> = OnceLock::new();
        WH.get_or_init(|| {
            let products = (0..19)
                .flat_map(|sx| (0..11).map(move |sy| (sx, sy)))
                .enumerate()
                .map(|(id, (sx, sy))| Product::from_shelf(id, sx, sy).with_weight(1.0));
            Warehouse::new(LayoutConfig::default(), products).expect("valid")
        })
    }

    fn random_order(rng: &mut StdRng, len: usize) -> Order {
        let n = warehouse().num_products();
        Order::from_products(
            &(0..len).map(|_| rng.random_range(0..n)).collect::<Vec<_>>(),
            0,
        )
    }

    #[test]
    fn test_ring_from_pseudo_matches_plain_nn() {
        let wh = warehouse();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let order = random_order(&mut rng, 6);
            let start = Point::new(0, 0);
            let end = Point::new(38, 22);
            let stops = wh.stops(&order).expect("known");
            let mut ring = vec![Stop::Pseudo { entry: end, exit: start }];
            ring.extend(stops.iter().copied());
            let seq = nearest_neighbor_ring(wh, &ring, 0, start);
            let (plain, _) = nearest_neighbor(wh, &order, start, end).expect("valid");
            assert_eq!(order.permuted(&seq), plain);
        }
    }

    #[test]
    fn test_ring_rotation_from_item_origin() {
        let wh = warehouse();
        let order = Order::from_products(&[0, 1], 0);
        let start = Point::new(0, 0);
        let stops = wh.stops(&order).expect("known");
        let mut ring = vec![Stop::Pseudo { entry: start, exit: start }];
        ring.extend(stops.iter().copied());
        // Origin item 1 at slot (1, 3) standing on (0, 3): the ring is
        // item1 -> item0 -> pseudo, which rotates to [item1, item0].
        let seq = nearest_neighbor_ring(wh, &ring, 2, Point::new(0, 3));
        assert_eq!(seq, vec![1, 0]);
    }

    #[test]
    fn test_restarts_beat_single_pass() {
        let wh = warehouse();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let order = random_order(&mut rng, 8);
            let start = Point::new(0, 0);
            let (single, single_len) = nearest_neighbor(wh, &order, start, start).expect("valid");
            let (best, best_len) =
                nearest_neighbor_restarts(wh, &order, start, start, None).expect("valid");
            assert!(best.is_permutation_of(&order));
            assert!(single.is_permutation_of(&order));
            assert!(best_len <= single_len + 1e-10);
        }
    }

    #[test]
    fn test_iteration_cap_only_pseudo() {
        let wh = warehouse();
        let mut rng = StdRng::seed_from_u64(3);
        let order = random_order(&mut rng, 7);
        let start = Point::new(10, 0);
        let (capped, capped_len) =
            nearest_neighbor_restarts(wh, &order, start, start, Some(1)).expect("valid");
        let (_, full_len) =
            nearest_neighbor_restarts(wh, &order, start, start, None).expect("valid");
        let (_, out_of_range) =
            nearest_neighbor_restarts(wh, &order, start, start, Some(100)).expect("valid");
        let (_, zero) =
            nearest_neighbor_restarts(wh, &order, start, start, Some(0)).expect("valid");
        assert!(capped.is_permutation_of(&order));
        assert!(full_len <= capped_len + 1e-10);
        assert!((out_of_range - full_len).abs() < 1e-10);
        assert!((zero - full_len).abs() < 1e-10);
    }

    #[test]
    fn test_restarts_find_optimum_where_greedy_fails() {
        // Greedy from (0, 0) picks slot 1 first and walks 58; the ring
        // started at slot 2 finds the optimum of 38.
        let wh = Warehouse::new(
            LayoutConfig::default(),
            vec![
                Product::from_shelf(1, 2, 0),
                Product::from_shelf(2, 0, 5),
                Product::from_shelf(3, 6, 0),
            ],
        )
        .expect("valid");
        let order = Order::from_products(&[1, 2, 3], 0);
        let start = Point::new(0, 0);
        let end = Point::new(14, 0);
        let (_, optimum) = brute_force(&wh, &order, start, end).expect("valid");
        let (_, nni) = nearest_neighbor_restarts(&wh, &order, start, end, None).expect("valid");
        assert!((nni - optimum).abs() < 1e-10);
    }

    #[test]
    fn test_one_sided_origins_start_one_ring() {
        let wh = Warehouse::new(
            LayoutConfig::default(),
            vec![
                Product::from_shelf(1, 2, 4),
                Product::from_shelf(2, 5, 1).with_sides(true, false),
                Product::from_shelf(3, 8, 6).with_sides(false, true),
            ],
        )
        .expect("valid");
        let order = Order::from_products(&[1, 2, 3], 0);
        let start = Point::new(0, 0);
        let mut ring = vec![Stop::at(start)];
        ring.extend(wh.stops(&order).expect("known"));

        let origins = ring_origins(&ring, ring.len());
        assert_eq!(
            origins,
            vec![
                (0, start),
                (1, Point::new(4, 9)),
                (1, Point::new(6, 9)),
                (2, Point::new(10, 3)),
                (3, Point::new(18, 13)),
            ]
        );
        assert_eq!(origins.iter().filter(|(o, _)| *o == 2).count(), 1);
        assert_eq!(ring_origins(&ring, 2).len(), 3);
    }

    #[test]
    fn test_restarts_honor_closed_sides() {
        // Slot 1 is only reachable from the left, slot 2 only from the right.
        let wh = Warehouse::new(
            LayoutConfig::default(),
            vec![
                Product::from_shelf(1, 9, 2).with_sides(true, false),
                Product::from_shelf(2, 3, 7).with_sides(false, true),
                Product::from_shelf(3, 12, 9),
            ],
        )
        .expect("valid");
        let order = Order::from_products(&[3, 1, 2], 0);
        let start = Point::new(0, 0);
        let end = Point::new(38, 22);
        let (best, len) = nearest_neighbor_restarts(&wh, &order, start, end, None).expect("valid");
        assert!(best.is_permutation_of(&order));
        let eval = RouteEvaluator::new(&wh);
        for leg in eval.legs(&best, start, end).expect("valid") {
            match leg.product_id {
                Some(1) => assert_eq!(leg.to, Point::new(18, 5)),
                Some(2) => assert_eq!(leg.to, Point::new(8, 15)),
                _ => {}
            }
        }
        let check = eval.route_length(&best, start, end).expect("valid");
        assert!((len - check).abs() < 1e-10);
        let (_, optimum) = brute_force(&wh, &order, start, end).expect("valid");
        assert!(len + 1e-10 >= optimum);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_restarts_permute_and_never_worsen(
            ids in proptest::collection::vec(0usize..209, 1..9),
            sx in 0i32..=19,
            sy in 0i32..=11,
        ) {
            let wh = warehouse();
            let order = Order::from_products(&ids, 1);
            let start = Point::new(2 * sx, 2 * sy);
            let (best, len) = nearest_neighbor_restarts(wh, &order, start, start, None).unwrap();
            prop_assert!(best.is_permutation_of(&order));
            let baseline = RouteEvaluator::new(wh).route_length(&order, start, start).unwrap();
            prop_assert!(len <= baseline + 1e-10);
            let check = RouteEvaluator::new(wh).route_length(&best, start, start).unwrap();
            prop_assert!((len - check).abs() < 1e-10);
        }
    }
}
