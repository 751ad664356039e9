//! Error types for warehouse construction and route optimization.
//!
//! Every variant except [`Error::InfeasiblePath`] is a caller error and is
//! raised before any optimization work starts. `InfeasiblePath` signals a
//! broken distance oracle and is not expected in a validated session.

use crate::models::Point;

/// Errors produced by the picking core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A point lies outside the configured grid bounds.
    #[error("point {point} lies outside the warehouse grid")]
    PointOutOfBounds {
        /// The offending point.
        point: Point,
    },

    /// A point is inside the grid but is a shelf cell, not an aisle node.
    #[error("point {point} is not an aisle node")]
    NotAisleNode {
        /// The offending point.
        point: Point,
    },

    /// An order references a product id missing from the catalog.
    #[error("unknown product id {id}")]
    UnknownProduct {
        /// The missing product id.
        id: usize,
    },

    /// An order with no items was passed to a route operation.
    #[error("order is empty")]
    EmptyOrder,

    /// The catalog already holds a product with this id.
    #[error("duplicate product id {id}")]
    DuplicateProduct {
        /// The duplicated id.
        id: usize,
    },

    /// A slot position has no reachable approach point inside the grid.
    #[error("product {id} has no usable approach point at slot {position}")]
    InvalidSlot {
        /// Product id.
        id: usize,
        /// Slot position.
        position: Point,
    },

    /// A product weight is negative or not finite.
    #[error("product {id} has an invalid weight")]
    InvalidWeight {
        /// Product id.
        id: usize,
    },

    /// The layout configuration is unusable.
    #[error("invalid layout: {reason}")]
    InvalidLayout {
        /// Human-readable reason.
        reason: String,
    },

    /// The order is too long for the requested exhaustive strategy.
    #[error("order has {len} items, exhaustive search supports at most {max}")]
    OrderTooLarge {
        /// Number of items in the order.
        len: usize,
        /// Supported maximum.
        max: usize,
    },

    /// The distance oracle has no entry for the requested pair.
    #[error("no precomputed distance from {from} to {to}")]
    InfeasiblePath {
        /// Source point.
        from: Point,
        /// Destination point.
        to: Point,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
