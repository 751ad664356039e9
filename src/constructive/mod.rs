//! Constructive heuristics for ordering picks.
//!
//! - [`nearest_neighbor`] — Single greedy pass from the start point, O(n²)
//! - [`nearest_neighbor_restarts`] — Greedy rings from every origin and slot side, O(n³)

mod nearest_neighbor;
mod restarts;

pub use nearest_neighbor::nearest_neighbor;
pub use restarts::nearest_neighbor_restarts;
