//! Single-pass nearest-neighbor constructive heuristic.
//!
//! Starting from the start point, repeatedly walk to the unpicked item whose
//! standing point is closest, then return to the end point.
//!
//! # Complexity
//!
//! O(n²) oracle lookups where n = number of items.
//!
//! The result depends heavily on the start point and on which side of each
//! slot is approached; [`nearest_neighbor_restarts`](super::nearest_neighbor_restarts)
//! compensates by restarting from every item.

use crate::error::Result;
use crate::evaluation::RouteEvaluator;
use crate::models::{Order, Point};
use crate::Warehouse;

/// Orders items greedily by nearest standing point.
///
/// Ties go to the item listed first. Returns the reordered items and the
/// route length from `start` to `end`.
///
/// # Examples
///
/// ```
/// use u_picking::constructive::nearest_neighbor;
/// use u_picking::distance::LayoutConfig;
/// use u_picking::models::{Order, Point, Product};
/// use u_picking::Warehouse;
///
/// let wh = Warehouse::new(
///     LayoutConfig::default(),
///     vec![
///         Product::from_shelf(1, 10, 0),
///         Product::from_shelf(2, 1, 0),
///         Product::from_shelf(3, 5, 0),
///     ],
/// )
/// .unwrap();
/// let origin = Point::new(0, 0);
/// let order = Order::from_products(&[1, 2, 3], 0);
/// let (order, _) = nearest_neighbor(&wh, &order, origin, origin).unwrap();
/// assert_eq!(order.product_ids(), vec![2, 3, 1]);
/// ```
pub fn nearest_neighbor(
    warehouse: &Warehouse,
    order: &Order,
    start: Point,
    end: Point,
) -> Result<(Order, f64)> {
    warehouse.check_route(order, start, end)?;
    let stops = warehouse.stops(order)?;

    let mut remaining: Vec<usize> = (0..stops.len()).collect();
    let mut sequence = Vec::with_capacity(stops.len());
    let mut pos = start;

    while !remaining.is_empty() {
        let mut best: Option<(usize, f64, Point)> = None;
        for (slot, &k) in remaining.iter().enumerate() {
            let dest = stops[k].find_dest(pos);
            let d = warehouse.distance(pos, dest);
            if best.map_or(true, |(_, bd, _)| d < bd) {
                best = Some((slot, d, dest));
            }
        }
        let Some((slot, _, dest)) = best else { break };
        sequence.push(remaining.remove(slot));
        pos = dest;
    }

    let length = RouteEvaluator::new(warehouse).sequence_length(&stops, &sequence, start, end);
    Ok((order.permuted(&sequence), length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::LayoutConfig;
    use crate::error::Error;
    use crate::models::Product;

    fn line_warehouse() -> Warehouse {
        // Slots along the first shelf row at x = 3, 7, 11, 15.
        Warehouse::new(
            LayoutConfig::default(),
            vec![
                Product::from_shelf(1, 1, 0),
                Product::from_shelf(2, 3, 0),
                Product::from_shelf(3, 5, 0),
                Product::from_shelf(4, 7, 0),
            ],
        )
        .expect("valid")
    }

    #[test]
    fn test_nn_walks_along_the_row() {
        let wh = line_warehouse();
        let origin = Point::new(0, 0);
        let order = Order::from_products(&[4, 2, 3, 1], 0);
        let (nn, len) = nearest_neighbor(&wh, &order, origin, origin).expect("valid");
        assert_eq!(nn.product_ids(), vec![1, 2, 3, 4]);
        let check = RouteEvaluator::new(&wh)
            .route_length(&nn, origin, origin)
            .expect("valid");
        assert!((len - check).abs() < 1e-10);
    }

    #[test]
    fn test_nn_ties_keep_first() {
        let wh = line_warehouse();
        // Two picks of the same product are equally near; order ids stay put.
        let order = Order::new(vec![
            crate::models::Item::new(1, 7),
            crate::models::Item::new(1, 3),
        ]);
        let origin = Point::new(0, 0);
        let (nn, _) = nearest_neighbor(&wh, &order, origin, origin).expect("valid");
        assert_eq!(nn.items()[0].order_id, 7);
        assert!(nn.is_permutation_of(&order));
    }

    #[test]
    fn test_nn_rejects_empty_order() {
        let wh = line_warehouse();
        let origin = Point::new(0, 0);
        assert_eq!(
            nearest_neighbor(&wh, &Order::default(), origin, origin).err(),
            Some(Error::EmptyOrder)
        );
    }
}
