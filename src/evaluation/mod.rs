//! Route evaluation and reporting.
//!
//! - [`RouteEvaluator`] — route length, load-weighted effort, and per-leg breakdown
//! - [`RouteReport`] — turn-by-turn description of an evaluated route

mod evaluator;
mod report;

pub use evaluator::{Leg, RouteEffort, RouteEvaluator};
pub use report::RouteReport;
