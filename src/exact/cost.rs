//! Cost matrices and Little's row/column reduction.
//!
//! Matrix entries are lower bounds on real legs: leaving a slot is costed
//! from whichever open side makes the leg cheapest, because the side actually
//! used depends on the slot's predecessor. Leaving a pseudo-node is exact.

use crate::distance::DistanceMatrix;
use crate::models::{Point, Stop};
use crate::Warehouse;

/// Cheapest leg from `from` to `to` over every point `from` may be left from.
pub(crate) fn leg_lower_bound(warehouse: &Warehouse, from: &Stop<'_>, to: &Stop<'_>) -> f64 {
    from.departure_points()
        .into_iter()
        .map(|p| warehouse.distance(p, to.find_dest(p)))
        .fold(f64::INFINITY, f64::min)
}

/// Builds the search cost matrix over `[pseudo, item_1, ..., item_n]`.
///
/// Index 0 is the pseudo-node, left from `start` and entered at `end`; the
/// diagonal is infinite.
pub fn build_cost_matrix(
    warehouse: &Warehouse,
    stops: &[Stop<'_>],
    start: Point,
    end: Point,
) -> DistanceMatrix {
    let mut nodes = Vec::with_capacity(stops.len() + 1);
    nodes.push(Stop::Pseudo {
        entry: end,
        exit: start,
    });
    nodes.extend(stops.iter().copied());

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

/// Reduces every row, then every column, by its smallest finite entry.
///
/// Returns the total amount subtracted, which is a lower bound on the cost
/// of any assignment through the matrix. Rows or columns already holding a
/// zero, or holding only infinite entries, are left untouched.
pub fn reduce_matrix(matrix: &mut DistanceMatrix) -> f64 {
    let n = matrix.size();
    let mut reduction = 0.0;
    for i in 0..n {
        let Some(min) = matrix.row_min(i) else { continue };
        if min == 0.0 {
            continue;
        }
        reduction += min;
        for j in 0..n {
            matrix.set(i, j, matrix.get(i, j) - min);
        }
    }
    for j in 0..n {
        let Some(min) = matrix.column_min(j) else { continue };
        if min == 0.0 {
            continue;
        }
        reduction += min;
        for i in 0..n {
            matrix.set(i, j, matrix.get(i, j) - min);
        }
    }
    reduction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::LayoutConfig;
    use crate::evaluation::RouteEvaluator;
    use crate::models::{Order, Product};

    const INF: f64 = f64::INFINITY;

    #[test]
    fn test_reduce_textbook_matrix() {
        let mut m = DistanceMatrix::from_data(
            3,
            vec![
                INF, 4.0, 6.0, //
                5.0, INF, 2.0, //
                3.0, 9.0, INF,
            ],
        )
        .expect("valid");
        // Rows: 4 + 2 + 3 = 9. Columns after that: [1, 0, 2] -> col 0 min 0,
        // col 1 min 0, col 2 min 0.
        let r = reduce_matrix(&mut m);
        assert!((r - 9.0).abs() < 1e-10);
        assert_eq!(m.row(0), &[INF, 0.0, 2.0]);
        assert_eq!(m.row(1), &[3.0, INF, 0.0]);
        assert_eq!(m.row(2), &[0.0, 6.0, INF]);
    }

    #[test]
    fn test_reduce_column_pass() {
        let mut m = DistanceMatrix::from_data(
            3,
            vec![
                INF, 1.0, 5.0, //
                1.0, INF, 5.0, //
                1.0, 1.0, INF,
            ],
        )
        .expect("valid");
        let r = reduce_matrix(&mut m);
        // Rows subtract 1 each, then column 2 still needs 4.
        assert!((r - 7.0).abs() < 1e-10);
        assert_eq!(m.get(0, 2), 0.0);
        assert_eq!(m.get(1, 2), 0.0);
    }

    #[test]
    fn test_reduce_skips_infinite_rows() {
        let mut m = DistanceMatrix::filled(2, INF);
        m.set(0, 1, 3.0);
        let r = reduce_matrix(&mut m);
        assert!((r - 3.0).abs() < 1e-10);
        assert!(m.row(1).iter().all(|v| v.is_infinite()));
    }

    #[test]
    fn test_cost_matrix_entries_bound_real_legs() {
        let wh = Warehouse::new(
            LayoutConfig::default(),
            vec![
                Product::from_shelf(1, 2, 4),
                Product::from_shelf(2, 6, 1),
                Product::from_shelf(3, 2, 7),
            ],
        )
        .expect("valid");
        let order = Order::from_products(&[1, 2, 3], 0);
        let stops = wh.stops(&order).expect("known");
        let start = Point::new(0, 0);
        let end = Point::new(20, 4);
        let m = build_cost_matrix(&wh, &stops, start, end);
        assert_eq!(m.size(), 4);
        assert!(m.get(0, 0).is_infinite());
        // Leaving the pseudo-node is exact.
        let first = stops[0].find_dest(start);
        assert!((m.get(0, 1) - wh.distance(start, first)).abs() < 1e-10);

        // Every consecutive leg of a real route costs at least its entry.
        let eval = RouteEvaluator::new(&wh);
        let legs = eval.legs(&order, start, end).expect("valid");
        let path = [0usize, 1, 2, 3, 0];
        for (leg, w) in legs.iter().zip(path.windows(2)) {
            assert!(m.get(w[0], w[1]) <= leg.distance + 1e-10);
        }
    }
}
