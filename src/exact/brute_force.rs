//! Exhaustive permutation search, for small orders and for cross-checking.

use crate::error::{Error, Result};
use crate::evaluation::RouteEvaluator;
use crate::models::{Order, Point};
use crate::Warehouse;

/// Largest order [`brute_force`] accepts (10! = 3 628 800 routes).
pub const BRUTE_FORCE_MAX_ITEMS: usize = 10;

/// Evaluates every visiting order and returns the shortest.
///
/// Permutations are enumerated in lexicographic order of item positions and
/// the first minimum wins, so the result is deterministic.
///
/// # Errors
///
/// [`Error::OrderTooLarge`] for orders longer than [`BRUTE_FORCE_MAX_ITEMS`],
/// plus the usual route validation errors.
pub fn brute_force(
    warehouse: &Warehouse,
    order: &Order,
    start: Point,
    end: Point,
) -> Result<(Order, f64)> {
    warehouse.check_route(order, start, end)?;
    if order.len() > BRUTE_FORCE_MAX_ITEMS {
        return Err(Error::OrderTooLarge {
            len: order.len(),
            max: BRUTE_FORCE_MAX_ITEMS,
        });
    }
    let stops = warehouse.stops(order)?;
    let evaluator = RouteEvaluator::new(warehouse);

    let mut perm: Vec<usize> = (0..stops.len()).collect();
    let mut best_len = evaluator.sequence_length(&stops, &perm, start, end);
    let mut best = perm.clone();
    while next_permutation(&mut perm) {
        let len = evaluator.sequence_length(&stops, &perm, start, end);
        if len < best_len {
            best_len = len;
            best.copy_from_slice(&perm);
        }
    }
    Ok((order.permuted(&best), best_len))
}

/// Advances `perm` to its lexicographic successor; `false` once exhausted.
fn next_permutation(perm: &mut [usize]) -> bool {
    let Some(pivot) = perm.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let Some(swap) = perm.iter().rposition(|&v| v > perm[pivot]) else {
        return false;
    };
    perm.swap(pivot, swap);
    perm[pivot + 1..].reverse();
    true
}
