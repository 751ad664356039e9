//! Best-first branch-and-bound over reduced cost matrices (Little's algorithm).
//!
//! # Algorithm
//!
//! Every search node owns a copy of the reduced cost matrix, the lower bound
//! accumulated so far, and the partial path, which always starts at the
//! pseudo-node (index 0). Extending the path by `d` from its last index:
//!
//! 1. forbids leaving the last index again (its row becomes +∞),
//! 2. forbids `d -> last` and every `d -> placed` edge, including the return
//!    to the pseudo-node while items remain,
//! 3. forbids entering `d` again (its column becomes +∞),
//! 4. reduces the child and adds the reduction plus the parent edge cost.
//!
//! The frontier pops the smallest bound first, preferring deeper paths on
//! ties. Complete paths are evaluated with the real route length, never with
//! their bound. The search stops once the smallest bound reaches the
//! incumbent (optimality is proven) or the wall-clock deadline passes.
//!
//! The incumbent is seeded from
//! [`nearest_neighbor_restarts`](crate::constructive::nearest_neighbor_restarts),
//! so the result is never worse than the heuristic.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::cost::{build_cost_matrix, reduce_matrix};
use crate::constructive::nearest_neighbor_restarts;
use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::evaluation::RouteEvaluator;
use crate::models::{Order, Point};
use crate::Warehouse;

/// Slack for comparing bounds built from subtracted floats.
const EPSILON: f64 = 1e-9;

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchStatus {
    /// The frontier was exhausted or its best bound reached the incumbent.
    Optimal,
    /// The deadline passed first; the result is the best found so far.
    TimeLimitReached,
}

impl SearchStatus {
    /// Returns `true` if the result is proven optimal.
    pub fn is_optimal(&self) -> bool {
        matches!(self, SearchStatus::Optimal)
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStatus::Optimal => write!(f, "Optimal"),
            SearchStatus::TimeLimitReached => write!(f, "Time limit reached"),
        }
    }
}

/// Counters collected during one branch-and-bound run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Nodes popped from the frontier and expanded.
    pub nodes_explored: u64,
    /// Children built while expanding.
    pub nodes_generated: u64,
    /// Children or frontier nodes discarded because their bound reached the incumbent.
    pub prunings_bound: u64,
    /// Complete paths whose real length was evaluated.
    pub leaves_evaluated: u64,
    /// Incumbent improvements over the seed.
    pub solutions_found: u64,
    /// Longest partial path expanded, counting the pseudo-node.
    pub max_depth: u64,
    /// Bound of the root node after the first reduction.
    pub root_bound: f64,
    /// Real route length of the heuristic seed.
    pub seed_length: f64,
    /// Bound of the seed's path through the reduction machinery.
    pub seed_bound: f64,
    /// Wall-clock time spent, seeding included.
    pub time_total: Duration,
}

impl SearchStats {
    #[inline]
    fn on_node_explored(&mut self, depth: usize) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
        self.max_depth = self.max_depth.max(depth as u64);
    }

    #[inline]
    fn on_node_generated(&mut self) {
        self.nodes_generated = self.nodes_generated.saturating_add(1);
    }

    #[inline]
    fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    fn on_leaf_evaluated(&mut self) {
        self.leaves_evaluated = self.leaves_evaluated.saturating_add(1);
    }

    #[inline]
    fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Branch-and-bound statistics:")?;
        writeln!(f, "  Nodes explored:    {}", self.nodes_explored)?;
        writeln!(f, "  Nodes generated:   {}", self.nodes_generated)?;
        writeln!(f, "  Max depth:         {}", self.max_depth)?;
        writeln!(f, "  Prunings (bound):  {}", self.prunings_bound)?;
        writeln!(f, "  Leaves evaluated:  {}", self.leaves_evaluated)?;
        writeln!(f, "  Solutions found:   {}", self.solutions_found)?;
        writeln!(f, "  Root bound:        {:.3}", self.root_bound)?;
        writeln!(f, "  Seed bound:        {:.3}", self.seed_bound)?;
        writeln!(f, "  Seed length:       {:.3}", self.seed_length)?;
        writeln!(f, "  Total time:        {:.2?}", self.time_total)?;
        Ok(())
    }
}

/// Outcome of [`branch_and_bound`].
#[derive(Debug, Clone)]
pub struct BranchAndBoundResult {
    order: Order,
    length: f64,
    status: SearchStatus,
    stats: SearchStats,
}

impl BranchAndBoundResult {
    /// The best visiting order found.
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Consumes the result, returning the order.
    pub fn into_order(self) -> Order {
        self.order
    }

    /// Real route length of [`order`](Self::order).
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Whether optimality was proven.
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Search counters.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

/// A search-tree node. Owns its matrix exclusively.
#[derive(Debug, Clone)]
struct SearchNode {
    bound: f64,
    path: Vec<usize>,
    matrix: DistanceMatrix,
}

impl SearchNode {
    fn root(mut matrix: DistanceMatrix) -> Self {
        let bound = reduce_matrix(&mut matrix);
        Self {
            bound,
            path: vec![0],
            matrix,
        }
    }

    fn last(&self) -> usize {
        self.path[self.path.len() - 1]
    }

    fn is_complete(&self) -> bool {
        self.path.len() == self.matrix.size()
    }

    /// Indices reachable from the last placed index.
    fn open_destinations(&self) -> impl Iterator<Item = usize> + '_ {
        let row = self.matrix.row(self.last());
        (1..row.len()).filter(move |&d| row[d].is_finite())
    }

    fn branch(&self, dest: usize) -> Self {
        const INF: f64 = f64::INFINITY;
        let last = self.last();
        // The final placement must keep its way back to the pseudo-node.
        let closing = (self.path.len() + 1 == self.matrix.size()).then_some(0);

        let mut matrix = self.matrix.clone();
        matrix.fill_row(last, INF);
        if closing != Some(last) {
            matrix.set(dest, last, INF);
        }
        matrix.fill_column(dest, INF);
        for &placed in &self.path {
            if closing != Some(placed) {
                matrix.set(dest, placed, INF);
            }
        }
        let reduction = reduce_matrix(&mut matrix);

        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(dest);
        Self {
            bound: self.bound + reduction + self.matrix.get(last, dest),
            path,
            matrix,
        }
    }

    /// Item indices in visiting order, without the pseudo-node.
    fn sequence(&self) -> Vec<usize> {
        self.path[1..].iter().map(|&k| k - 1).collect()
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode {}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode {
    /// Max-heap order: smaller bound first, then longer path.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .bound
            .total_cmp(&self.bound)
            .then_with(|| self.path.len().cmp(&other.path.len()))
    }
}

/// Solves the picking order exactly, within `time_limit`.
///
/// The deadline is polled once per frontier pop. A zero limit returns the
/// heuristic seed unchanged with [`SearchStatus::TimeLimitReached`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_picking::distance::LayoutConfig;
/// use u_picking::exact::{branch_and_bound, brute_force, SearchStatus};
/// use u_picking::models::{Order, Point, Product};
/// use u_picking::Warehouse;
///
/// let wh = Warehouse::new(
///     LayoutConfig::default(),
///     vec![
///         Product::from_shelf(1, 2, 0),
///         Product::from_shelf(2, 0, 5),
///         Product::from_shelf(3, 6, 0),
///     ],
/// )
/// .unwrap();
/// let order = Order::from_products(&[1, 2, 3], 0);
/// let (start, end) = (Point::new(0, 0), Point::new(14, 0));
/// let result = branch_and_bound(&wh, &order, start, end, Duration::from_secs(5)).unwrap();
/// assert_eq!(result.status(), SearchStatus::Optimal);
/// assert!((result.length() - 38.0).abs() < 1e-10);
/// ```
pub fn branch_and_bound(
    warehouse: &Warehouse,
    order: &Order,
    start: Point,
    end: Point,
    time_limit: Duration,
) -> Result<BranchAndBoundResult> {
    let started = Instant::now();
    let deadline = started.checked_add(time_limit);

    let (seed, seed_length) = nearest_neighbor_restarts(warehouse, order, start, end, None)?;
    // Search in the seed's index space so the seed is the identity sequence.
    let stops = warehouse.stops(&seed)?;
    let evaluator = RouteEvaluator::new(warehouse);

    let root = SearchNode::root(build_cost_matrix(warehouse, &stops, start, end));
    let mut stats = SearchStats {
        root_bound: root.bound,
        seed_length,
        seed_bound: (1..=stops.len())
            .fold(root.clone(), |node, dest| node.branch(dest))
            .bound,
        ..SearchStats::default()
    };
    debug!(
        "branch-and-bound: {} items, root bound {:.3}, seed {:.3}",
        stops.len(),
        stats.root_bound,
        seed_length
    );

    let mut best_seq: Vec<usize> = (0..stops.len()).collect();
    let mut best_len = seed_length;
    let mut status = SearchStatus::Optimal;

    let mut frontier = BinaryHeap::new();
    frontier.push(root);

    while let Some(node) = frontier.pop() {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            status = SearchStatus::TimeLimitReached;
            warn!(
                "branch-and-bound deadline of {time_limit:?} reached with {} open nodes",
                frontier.len() + 1
            );
            break;
        }
        if node.bound + EPSILON >= best_len {
            // Every remaining node bounds at least this high.
            stats.on_pruning_bound();
            break;
        }
        stats.on_node_explored(node.path.len());

        for dest in node.open_destinations() {
            let child = node.branch(dest);
            stats.on_node_generated();
            if child.is_complete() {
                stats.on_leaf_evaluated();
                let sequence = child.sequence();
                let len = evaluator.sequence_length(&stops, &sequence, start, end);
                if len + EPSILON < best_len {
                    debug!("branch-and-bound: incumbent improved to {len:.3}");
                    best_len = len;
                    best_seq = sequence;
                    stats.on_solution_found();
                }
            } else if child.bound + EPSILON < best_len {
                frontier.push(child);
            } else {
                stats.on_pruning_bound();
            }
        }
    }

    stats.time_total = started.elapsed();
    debug!("branch-and-bound finished: {status}, length {best_len:.3}");

    Ok(BranchAndBoundResult {
        order: seed.permuted(&best_seq),
        length: best_len,
        status,
        stats,
    })
}
