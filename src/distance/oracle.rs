//! Precomputed all-pairs distances between aisle nodes.

use log::debug;

use crate::error::{Error, Result};
use crate::models::{Path, Point};

use super::{find_path, path_length, DistanceMatrix, LayoutConfig};

/// All-pairs shortest distances between the aisle nodes of a layout.
///
/// Built once per layout and read-only afterwards; every lookup is O(1).
///
/// # Examples
///
/// ```
/// use u_picking::distance::{DistanceOracle, LayoutConfig};
/// use u_picking::models::Point;
///
/// let oracle = DistanceOracle::build(LayoutConfig::default()).unwrap();
/// let d = oracle.distance(Point::new(0, 0), Point::new(4, 9));
/// assert!((d - 13.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceOracle {
    layout: LayoutConfig,
    /// Node index per grid cell (row-major), `None` on shelf cells.
    node_index: Vec<Option<usize>>,
    nodes: Vec<Point>,
    table: DistanceMatrix,
}

impl DistanceOracle {
    /// Precomputes the distance between every ordered pair of aisle nodes.
    pub fn build(layout: LayoutConfig) -> Result<Self> {
        layout.validate()?;

        let nodes: Vec<Point> = layout.aisle_nodes().collect();
        let mut node_index = vec![None; layout.columns() * layout.rows()];
        for (i, p) in nodes.iter().enumerate() {
            node_index[p.y as usize * layout.columns() + p.x as usize] = Some(i);
        }

        let n = nodes.len();
        let mut table = DistanceMatrix::new(n);
        for (i, &src) in nodes.iter().enumerate() {
            for (j, &dest) in nodes.iter().enumerate() {
                table.set(i, j, path_length(&find_path(src, dest), &layout));
            }
        }
        debug!(
            "distance oracle built: {}x{} grid, {} aisle nodes, {} pairs",
            layout.columns(),
            layout.rows(),
            n,
            n * n
        );

        Ok(Self {
            layout,
            node_index,
            nodes,
            table,
        })
    }

    /// Layout this oracle was built for.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Number of aisle nodes covered.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All aisle nodes, in table order.
    pub fn nodes(&self) -> &[Point] {
        &self.nodes
    }

    /// Returns `true` if `p` has a table entry.
    pub fn covers(&self, p: Point) -> bool {
        self.index_of(p).is_some()
    }

    fn index_of(&self, p: Point) -> Option<usize> {
        if !self.layout.contains(p) {
            return None;
        }
        self.node_index[p.y as usize * self.layout.columns() + p.x as usize]
    }

    /// Looks up the distance from `from` to `to`.
    ///
    /// Fails with [`Error::InfeasiblePath`] if either point is not a covered
    /// aisle node.
    pub fn try_distance(&self, from: Point, to: Point) -> Result<f64> {
        match (self.index_of(from), self.index_of(to)) {
            (Some(i), Some(j)) => Ok(self.table.get(i, j)),
            _ => Err(Error::InfeasiblePath { from, to }),
        }
    }

    /// Looks up the distance from `from` to `to`.
    ///
    /// Callers validate points up front, so a miss here means the oracle and
    /// the product catalog disagree.
    ///
    /// # Panics
    ///
    /// Panics if either point is not a covered aisle node.
    pub fn distance(&self, from: Point, to: Point) -> f64 {
        match self.try_distance(from, to) {
            Ok(d) => d,
            Err(e) => panic!("distance oracle invariant violated: {e}"),
        }
    }

    /// Turn points from `from` to `to` under this layout's movement model.
    pub fn path(&self, from: Point, to: Point) -> Path {
        find_path(from, to)
    }
}
