//! Exact solvers.
//!
//! - [`branch_and_bound`]: Little's reduced-matrix search with a best-first
//!   frontier and a wall-clock budget, seeded by the restart heuristic.
//! - [`brute_force`]: exhaustive enumeration for small orders.
//!
//! The cost matrix builder and reduction pass are shared with the
//! [`bounds`](crate::bounds) module.

mod branch_and_bound;
mod brute_force;
mod cost;

pub use branch_and_bound::{branch_and_bound, BranchAndBoundResult, SearchStats, SearchStatus};
pub use brute_force::{brute_force, BRUTE_FORCE_MAX_ITEMS};
pub use cost::{build_cost_matrix, reduce_matrix};
pub(crate) use cost::leg_lower_bound;
