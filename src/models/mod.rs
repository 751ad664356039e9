//! Domain model types for warehouse picking.
//!
//! Grid points and turn-point paths, products stored in shelf slots, the
//! slot/pseudo-node [`Stop`] variant that routes visit, and the items and
//! orders that optimizers reorder.

mod order;
mod point;
mod product;

pub use order::{Item, Order};
pub use point::{Path, Point};
pub use product::{Product, Stop};
