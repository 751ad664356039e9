//! # u-picking
//!
//! Warehouse order-picking route optimization: a precomputed grid distance
//! oracle, a nearest-neighbor restart heuristic, and an exact
//! branch-and-bound solver built on Little's matrix reduction.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Point, Path, Product, Stop, Item, Order)
//! - [`distance`] — Grid layout, movement paths, and the all-pairs distance oracle
//! - [`warehouse`] — Product catalog plus oracle, the shared read-only state
//! - [`evaluation`] — Route length, load-weighted effort, and turn-by-turn reports
//! - [`constructive`] — Nearest neighbor and its restart variant
//! - [`exact`] — Branch-and-bound and brute-force search
//! - [`bounds`] — Standalone route length lower bounds
//! - [`solver`] — Strategy selection through [`Planner`]
//!
//! ## Example
//!
//! ```
//! use u_picking::distance::LayoutConfig;
//! use u_picking::evaluation::RouteReport;
//! use u_picking::models::{Order, Point, Product};
//! use u_picking::{Planner, Strategy, Warehouse};
//!
//! let warehouse = Warehouse::new(
//!     LayoutConfig::default(),
//!     vec![
//!         Product::from_shelf(1, 2, 4).with_weight(1.0),
//!         Product::from_shelf(2, 10, 1).with_weight(2.5),
//!         Product::from_shelf(3, 5, 9).with_weight(0.5),
//!     ],
//! )
//! .unwrap();
//!
//! let order = Order::from_products(&[1, 2, 3], 0);
//! let origin = Point::new(0, 0);
//! let plan = Planner::new(&warehouse)
//!     .optimize(&order, origin, origin, Strategy::default())
//!     .unwrap();
//! assert!(plan.order.is_permutation_of(&order));
//!
//! let evaluator = u_picking::evaluation::RouteEvaluator::new(&warehouse);
//! let report = RouteReport::new(&evaluator, &plan.order, origin, origin).unwrap();
//! assert!((report.length() - plan.length).abs() < 1e-10);
//! ```

pub mod bounds;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod exact;
pub mod models;
pub mod solver;
pub mod warehouse;

pub use error::{Error, Result};
pub use exact::SearchStatus;
pub use solver::{Plan, Planner, Strategy};
pub use warehouse::Warehouse;
