//! Grid topology and the distance oracle.
//!
//! Provides the layout configuration, the row-parity movement model
//! ([`find_path`], [`path_length`]), the dense [`DistanceMatrix`], and the
//! precomputed [`DistanceOracle`] over all aisle nodes.

mod layout;
mod matrix;
mod oracle;
mod path;

pub use layout::LayoutConfig;
pub use matrix::DistanceMatrix;
pub use oracle::DistanceOracle;
pub use path::{find_path, path_length};
