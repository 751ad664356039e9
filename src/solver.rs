//! Optimization entry point: pick a strategy, get back a reordered order.

use std::fmt;
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::constructive::{nearest_neighbor, nearest_neighbor_restarts};
use crate::error::Result;
use crate::exact::{branch_and_bound, brute_force, SearchStats, SearchStatus};
use crate::models::{Order, Point};
use crate::Warehouse;

/// Optimizer selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// One greedy nearest-neighbor pass from the start point.
    NearestNeighbor,
    /// Greedy rings from every origin and approach side, best kept.
    NearestNeighborRestarts {
        /// Limits how many origins are tried; `None` tries all.
        iteration_cap: Option<usize>,
    },
    /// Exact search with a wall-clock budget.
    BranchAndBound {
        /// Search budget; the best order found so far is returned when it runs out.
        time_limit: Duration,
    },
    /// Every permutation; small orders only.
    BruteForce,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::NearestNeighborRestarts {
            iteration_cap: None,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::NearestNeighbor => write!(f, "nearest neighbor"),
            Strategy::NearestNeighborRestarts {
                iteration_cap: Some(cap),
            } => write!(f, "nearest neighbor restarts (cap {cap})"),
            Strategy::NearestNeighborRestarts { iteration_cap: None } => {
                write!(f, "nearest neighbor restarts")
            }
            Strategy::BranchAndBound { time_limit } => {
                write!(f, "branch and bound ({time_limit:?})")
            }
            Strategy::BruteForce => write!(f, "brute force"),
        }
    }
}

/// An optimized visiting order and its route length.
#[derive(Debug, Clone)]
pub struct Plan {
    /// Reordered items.
    pub order: Order,
    /// Route length from start to end.
    pub length: f64,
    /// Search outcome of an exact strategy; `None` for heuristics.
    pub status: Option<SearchStatus>,
    /// Branch-and-bound counters, when that strategy ran.
    pub stats: Option<SearchStats>,
}

impl Plan {
    /// Returns `true` if the plan is known to be a shortest route.
    pub fn is_proven_optimal(&self) -> bool {
        self.status.is_some_and(|s| s.is_optimal())
    }
}

/// Runs optimizers against one warehouse.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_picking::distance::LayoutConfig;
/// use u_picking::models::{Order, Point, Product};
/// use u_picking::{Planner, Strategy, Warehouse};
///
/// let wh = Warehouse::new(
///     LayoutConfig::default(),
///     (1..=4).map(|id| Product::from_shelf(id, 4 * id as i32, id as i32)),
/// )
/// .unwrap();
/// let planner = Planner::new(&wh);
/// let order = Order::from_products(&[3, 1, 4, 2], 0);
/// let origin = Point::new(0, 0);
///
/// let quick = planner.optimize(&order, origin, origin, Strategy::default()).unwrap();
/// let exact = planner
///     .optimize(
///         &order,
///         origin,
///         origin,
///         Strategy::BranchAndBound { time_limit: Duration::from_secs(5) },
///     )
///     .unwrap();
/// assert!(exact.is_proven_optimal());
/// assert!(exact.length <= quick.length);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    warehouse: &'a Warehouse,
}

impl<'a> Planner<'a> {
    /// Creates a planner for `warehouse`.
    pub fn new(warehouse: &'a Warehouse) -> Self {
        Self { warehouse }
    }

    /// The warehouse being planned against.
    pub fn warehouse(&self) -> &'a Warehouse {
        self.warehouse
    }

    /// Reorders `order` for a walk from `start` to `end` using `strategy`.
    ///
    /// Inputs are validated before any optimizer runs. A branch-and-bound
    /// deadline is not an error; check [`Plan::status`].
    pub fn optimize(
        &self,
        order: &Order,
        start: Point,
        end: Point,
        strategy: Strategy,
    ) -> Result<Plan> {
        self.warehouse.check_route(order, start, end)?;
        let plan = match strategy {
            Strategy::NearestNeighbor => {
                let (order, length) = nearest_neighbor(self.warehouse, order, start, end)?;
                Plan {
                    order,
                    length,
                    status: None,
                    stats: None,
                }
            }
            Strategy::NearestNeighborRestarts { iteration_cap } => {
                let (order, length) =
                    nearest_neighbor_restarts(self.warehouse, order, start, end, iteration_cap)?;
                Plan {
                    order,
                    length,
                    status: None,
                    stats: None,
                }
            }
            Strategy::BranchAndBound { time_limit } => {
                let result = branch_and_bound(self.warehouse, order, start, end, time_limit)?;
                let length = result.length();
                let status = result.status();
                let stats = result.stats().clone();
                Plan {
                    order: result.into_order(),
                    length,
                    status: Some(status),
                    stats: Some(stats),
                }
            }
            Strategy::BruteForce => {
                let (order, length) = brute_force(self.warehouse, order, start, end)?;
                Plan {
                    order,
                    length,
                    status: Some(SearchStatus::Optimal),
                    stats: None,
                }
            }
        };
        info!(
            "{strategy}: {} items from {start} to {end}, length {:.3}",
            plan.order.len(),
            plan.length
        );
        Ok(plan)
    }
}
