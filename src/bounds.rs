//! Standalone lower-bound estimates for a picking route.
//!
//! Independent of the branch-and-bound search; intended for analysis, such
//! as judging how far a heuristic result can be from optimal.

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::exact::leg_lower_bound;
use crate::models::{Order, Point, Stop};
use crate::Warehouse;

/// Estimates the shortest route length for `order` from `start` to `end`.
///
/// The cost matrix holds, per ordered pair of stops, the cheapest leg over
/// every side a stop may be left from.
///
/// - Open path (`start != end`): start and end are separate nodes. The end
///   departs nowhere and the start is never entered. Every other node departs
///   exactly once, so the sum of row minima is a sound lower bound.
/// - Closed path (`start == end`): for each node, the other rows are summed
///   greedily and the node's two cheapest legs are added; the maximum over
///   nodes is returned. This is an estimate and can exceed the optimum when
///   leg costs are asymmetric.
///
/// # Examples
///
/// ```
/// use u_picking::bounds::lower_bound;
/// use u_picking::distance::LayoutConfig;
/// use u_picking::exact::brute_force;
/// use u_picking::models::{Order, Point, Product};
/// use u_picking::Warehouse;
///
/// let wh = Warehouse::new(
///     LayoutConfig::default(),
///     vec![Product::from_shelf(1, 2, 0), Product::from_shelf(2, 6, 3)],
/// )
/// .unwrap();
/// let order = Order::from_products(&[1, 2], 0);
/// let (start, end) = (Point::new(0, 0), Point::new(20, 0));
/// let bound = lower_bound(&wh, &order, start, end).unwrap();
/// let (_, optimum) = brute_force(&wh, &order, start, end).unwrap();
/// assert!(bound <= optimum);
/// ```
pub fn lower_bound(warehouse: &Warehouse, order: &Order, start: Point, end: Point) -> Result<f64> {
    warehouse.check_route(order, start, end)?;
    let stops = warehouse.stops(order)?;

    if start == end {
        let mut nodes = Vec::with_capacity(stops.len() + 1);
        nodes.push(Stop::at(start));
        nodes.extend(stops);
        let matrix = stop_matrix(warehouse, &nodes);
        return Ok(closed_tour_bound(&matrix));
    }

    let mut nodes = Vec::with_capacity(stops.len() + 2);
    nodes.push(Stop::at(start));
    nodes.push(Stop::at(end));
    nodes.extend(stops);
    let mut matrix = stop_matrix(warehouse, &nodes);
    matrix.fill_row(1, f64::INFINITY);
    matrix.fill_column(0, f64::INFINITY);
    Ok(greedy_row_bound(&matrix, None))
}

fn stop_matrix(warehouse: &Warehouse, nodes: &[Stop<'_>]) -> DistanceMatrix {
    let n = nodes.len();
    let mut matrix = DistanceMatrix::filled(n, f64::INFINITY);
    for (i, from) in nodes.iter().enumerate() {
        for (j, to) in nodes.iter().enumerate() {
            if i != j {
                matrix.set(i, j, leg_lower_bound(warehouse, from, to));
            }
        }
    }
    matrix
}

/// Repeatedly takes the smallest finite entry among the remaining rows and
/// removes its row, until no row has a finite entry.
///
/// `skip` excludes one row from the start.
pub fn greedy_row_bound(matrix: &DistanceMatrix, skip: Option<usize>) -> f64 {
    let mut active: Vec<usize> = (0..matrix.size()).filter(|&i| Some(i) != skip).collect();
    let mut total = 0.0;
    loop {
        let cheapest = active
            .iter()
            .enumerate()
            .filter_map(|(slot, &row)| matrix.row_min(row).map(|v| (slot, v)))
            .min_by(|a, b| a.1.total_cmp(&b.1));
        let Some((slot, value)) = cheapest else { break };
        total += value;
        active.swap_remove(slot);
    }
    total
}

/// Closed-tour estimate: the maximum over rows `k` of the greedy bound without
/// `k` plus the two smallest finite entries of row `k`.
pub fn closed_tour_bound(matrix: &DistanceMatrix) -> f64 {
    (0..matrix.size())
        .map(|k| greedy_row_bound(matrix, Some(k)) + two_smallest(matrix.row(k)))
        .fold(0.0, f64::max)
}

fn two_smallest(row: &[f64]) -> f64 {
    let mut first = f64::INFINITY;
    let mut second = f64::INFINITY;
    for &v in row.iter().filter(|v| v.is_finite()) {
        if v < first {
            second = first;
            first = v;
        } else if v < second {
            second = v;
        }
    }
    [first, second].into_iter().filter(|v| v.is_finite()).sum()
}
