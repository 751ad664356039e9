//! Warehouse layout configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Point;

/// Geometry of a rectangular warehouse grid.
///
/// Points range over `x` in `[0, max_x]` and `y` in `[0, max_y]`. Aisle nodes
/// sit on every other integer coordinate, so one grid step covers half of a
/// shelf plus half of an aisle along each axis.
///
/// # Examples
///
/// ```
/// use u_picking::distance::LayoutConfig;
/// use u_picking::models::Point;
///
/// let layout = LayoutConfig::default();
/// assert_eq!(layout.max_x(), 38);
/// assert_eq!(layout.max_y(), 22);
/// assert!((layout.step_x() - 1.0).abs() < 1e-10);
/// assert!(layout.contains(Point::new(38, 22)));
/// assert!(!layout.contains(Point::new(39, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    max_x: i32,
    max_y: i32,
    shelf_length: f64,
    shelf_width: f64,
    path_width_x: f64,
    path_width_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_x: 38,
            max_y: 22,
            shelf_length: 1.0,
            shelf_width: 1.0,
            path_width_x: 1.0,
            path_width_y: 1.0,
        }
    }
}

impl LayoutConfig {
    /// Sets the inclusive grid bounds.
    pub fn with_bounds(mut self, max_x: i32, max_y: i32) -> Self {
        self.max_x = max_x;
        self.max_y = max_y;
        self
    }

    /// Sets shelf length (x axis) and width (y axis).
    pub fn with_shelf_size(mut self, length: f64, width: f64) -> Self {
        self.shelf_length = length;
        self.shelf_width = width;
        self
    }

    /// Sets aisle clearance along each axis.
    pub fn with_path_width(mut self, x: f64, y: f64) -> Self {
        self.path_width_x = x;
        self.path_width_y = y;
        self
    }

    /// Largest valid x coordinate.
    pub fn max_x(&self) -> i32 {
        self.max_x
    }

    /// Largest valid y coordinate.
    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    /// Physical length of one grid step along x.
    pub fn step_x(&self) -> f64 {
        (self.shelf_length + self.path_width_x) / 2.0
    }

    /// Physical length of one grid step along y.
    pub fn step_y(&self) -> f64 {
        (self.shelf_width + self.path_width_y) / 2.0
    }

    /// Number of grid points per row.
    pub(crate) fn columns(&self) -> usize {
        (self.max_x + 1) as usize
    }

    /// Number of grid rows.
    pub(crate) fn rows(&self) -> usize {
        (self.max_y + 1) as usize
    }

    /// Returns `true` if `p` lies inside the grid bounds.
    pub fn contains(&self, p: Point) -> bool {
        (0..=self.max_x).contains(&p.x) && (0..=self.max_y).contains(&p.y)
    }

    /// Checks that `p` is an in-bounds aisle node.
    pub fn check_aisle_node(&self, p: Point) -> Result<()> {
        if !self.contains(p) {
            return Err(Error::PointOutOfBounds { point: p });
        }
        if !p.is_aisle_node() {
            return Err(Error::NotAisleNode { point: p });
        }
        Ok(())
    }

    /// Iterates all aisle nodes, row by row.
    pub fn aisle_nodes(&self) -> impl Iterator<Item = Point> + '_ {
        (0..=self.max_y)
            .flat_map(move |y| (0..=self.max_x).map(move |x| Point::new(x, y)))
            .filter(Point::is_aisle_node)
    }

    /// Rejects degenerate layouts.
    pub fn validate(&self) -> Result<()> {
        if self.max_x < 0 || self.max_y < 0 {
            return Err(Error::InvalidLayout {
                reason: format!("negative grid bounds ({}, {})", self.max_x, self.max_y),
            });
        }
        let dims = [
            ("shelf length", self.shelf_length),
            ("shelf width", self.shelf_width),
            ("path width x", self.path_width_x),
            ("path width y", self.path_width_y),
        ];
        for (name, value) in dims {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidLayout {
                    reason: format!("{name} must be finite and non-negative, got {value}"),
                });
            }
        }
        if self.step_x() <= 0.0 || self.step_y() <= 0.0 {
            return Err(Error::InvalidLayout {
                reason: "grid step length must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_from_json() {
        let layout: LayoutConfig =
            serde_json::from_str(r#"{ "max_x": 20, "path_width_y": 3.0 }"#).expect("parse");
        assert_eq!(layout.max_x(), 20);
        assert_eq!(layout.max_y(), 22);
        assert!((layout.step_y() - 2.0).abs() < 1e-10);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_default_is_valid() {
        assert!(LayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn test_step_units() {
        let layout = LayoutConfig::default()
            .with_shelf_size(2.0, 1.0)
            .with_path_width(1.0, 3.0);
        assert!((layout.step_x() - 1.5).abs() < 1e-10);
        assert!((layout.step_y() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_invalid_layouts() {
        let negative = LayoutConfig::default().with_bounds(-1, 4);
        assert!(matches!(
            negative.validate(),
            Err(Error::InvalidLayout { .. })
        ));
        let nan = LayoutConfig::default().with_shelf_size(f64::NAN, 1.0);
        assert!(nan.validate().is_err());
        let zero = LayoutConfig::default()
            .with_shelf_size(0.0, 1.0)
            .with_path_width(0.0, 1.0);
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_check_aisle_node() {
        let layout = LayoutConfig::default();
        assert!(layout.check_aisle_node(Point::new(0, 0)).is_ok());
        assert_eq!(
            layout.check_aisle_node(Point::new(-1, 0)),
            Err(Error::PointOutOfBounds {
                point: Point::new(-1, 0)
            })
        );
        assert_eq!(
            layout.check_aisle_node(Point::new(5, 9)),
            Err(Error::NotAisleNode {
                point: Point::new(5, 9)
            })
        );
    }

    #[test]
    fn test_aisle_node_count() {
        let layout = LayoutConfig::default().with_bounds(4, 2);
        // 15 points, shelf cells at (1,1) and (3,1).
        assert_eq!(layout.aisle_nodes().count(), 13);
        assert!(layout.aisle_nodes().all(|p| p.is_aisle_node()));
    }
}
