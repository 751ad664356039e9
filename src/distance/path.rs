//! Turn-point paths between aisle nodes.
//!
//! # Movement model
//!
//! Workers walk along aisle columns and may only change column on an
//! even-indexed (cross-aisle) row:
//!
//! ```text
//! same column:        src -> dest
//! src on even row:    src -> (dest.x, src.y) -> dest
//! src on odd row:     src -> (src.x, mid) -> (dest.x, mid) -> dest
//!                     mid = src.y + 1 if dest.y > src.y, else src.y - 1
//! ```
//!
//! When `mid == dest.y` the last vertical leg vanishes and the path has three
//! points.

use crate::models::{Path, Point};

use super::LayoutConfig;

/// Computes the turn points from `src` to `dest`, both endpoints included.
///
/// Returns an empty path when `src == dest`. Both points are expected to be
/// aisle nodes; no bounds are checked here.
///
/// # Examples
///
/// ```
/// use u_picking::distance::find_path;
/// use u_picking::models::Point;
///
/// let path = find_path(Point::new(0, 0), Point::new(4, 9));
/// assert_eq!(path.to_string(), "(0, 0)->(4, 0)->(4, 9)");
///
/// let path = find_path(Point::new(4, 9), Point::new(0, 0));
/// assert_eq!(path.to_string(), "(4, 9)->(4, 8)->(0, 8)->(0, 0)");
/// ```
pub fn find_path(src: Point, dest: Point) -> Path {
    if src == dest {
        return Path::empty();
    }
    if src.x == dest.x {
        return Path::new(vec![src, dest]);
    }
    if src.y % 2 != 0 {
        let mid = if dest.y > src.y { src.y + 1 } else { src.y - 1 };
        let turn = Point::new(dest.x, mid);
        if turn == dest {
            return Path::new(vec![src, Point::new(src.x, mid), dest]);
        }
        return Path::new(vec![src, Point::new(src.x, mid), turn, dest]);
    }
    let turn = Point::new(dest.x, src.y);
    if turn == dest {
        return Path::new(vec![src, dest]);
    }
    Path::new(vec![src, turn, dest])
}

/// Physical length of a path under the given layout.
///
/// Each grid step costs [`LayoutConfig::step_x`] or [`LayoutConfig::step_y`]
/// depending on the axis. An empty path has length zero.
pub fn path_length(path: &Path, layout: &LayoutConfig) -> f64 {
    path.points()
        .windows(2)
        .map(|w| {
            let (dx, dy) = w[0].displacement(&w[1]);
            dx as f64 * layout.step_x() + dy as f64 * layout.step_y()
        })
        .sum()
}
