//! Grid points and turn-point paths.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An integer location on the warehouse grid.
///
/// Aisle nodes (where a worker may stand) are the points whose coordinate
/// product is even; odd/odd points are shelf cells.
///
/// # Examples
///
/// ```
/// use u_picking::models::Point;
///
/// assert!(Point::new(4, 9).is_aisle_node());
/// assert!(!Point::new(5, 9).is_aisle_node());
/// assert_eq!(Point::new(5, 9).to_string(), "(5, 9)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns `true` if a worker may stand on this point.
    pub fn is_aisle_node(&self) -> bool {
        self.x % 2 == 0 || self.y % 2 == 0
    }

    /// Grid-step Manhattan displacement to `other`, per axis.
    pub fn displacement(&self, other: &Point) -> (u32, u32) {
        (self.x.abs_diff(other.x), self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// The turn points of a single point-to-point traversal, endpoints included.
///
/// An empty path means source and destination coincide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path(Vec<Point>);

impl Path {
    /// Wraps a list of turn points.
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// The empty ("no movement") path.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Turn points in traversal order.
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Number of turn points.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no movement is needed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First point, if any.
    pub fn source(&self) -> Option<Point> {
        self.0.first().copied()
    }

    /// Last point, if any.
    pub fn destination(&self) -> Option<Point> {
        self.0.last().copied()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.0.split_first() else {
            return write!(f, "no movement needed");
        };
        write!(f, "{first}")?;
        for p in rest {
            write!(f, "->{p}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aisle_node_parity() {
        assert!(Point::new(0, 0).is_aisle_node());
        assert!(Point::new(2, 7).is_aisle_node());
        assert!(Point::new(7, 2).is_aisle_node());
        assert!(!Point::new(1, 1).is_aisle_node());
        assert!(!Point::new(37, 21).is_aisle_node());
    }

    #[test]
    fn test_displacement() {
        let a = Point::new(0, 9);
        let b = Point::new(4, 2);
        assert_eq!(a.displacement(&b), (4, 7));
        assert_eq!(b.displacement(&a), (4, 7));
    }

    #[test]
    fn test_path_display() {
        let p = Path::new(vec![Point::new(0, 0), Point::new(4, 0), Point::new(4, 9)]);
        assert_eq!(p.to_string(), "(0, 0)->(4, 0)->(4, 9)");
        assert_eq!(Path::empty().to_string(), "no movement needed");
    }

    #[test]
    fn test_path_endpoints() {
        let p = Path::new(vec![Point::new(1, 2), Point::new(1, 6)]);
        assert_eq!(p.source(), Some(Point::new(1, 2)));
        assert_eq!(p.destination(), Some(Point::new(1, 6)));
        assert_eq!(p.len(), 2);
        assert!(Path::empty().source().is_none());
    }
}
