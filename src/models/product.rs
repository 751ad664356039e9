//! Products, storage slots, and the stops a route visits.

use serde::{Deserialize, Serialize};

use super::Point;

/// A product stored in a fixed shelf slot.
///
/// The slot sits on a shelf cell; the worker picks from one of the two aisle
/// nodes horizontally adjacent to it. Each side can be closed off.
///
/// # Examples
///
/// ```
/// use u_picking::models::{Point, Product};
///
/// let p = Product::from_shelf(7, 2, 4).with_weight(1.5);
/// assert_eq!(p.position(), Point::new(5, 9));
/// assert_eq!(p.find_dest(Point::new(0, 0)), Point::new(4, 9));
/// assert_eq!(p.find_dest(Point::new(10, 0)), Point::new(6, 9));
/// assert_eq!(p.weight(), Some(1.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: usize,
    position: Point,
    left: bool,
    right: bool,
    weight: Option<f64>,
}

impl Product {
    /// Creates a product at a slot position, approachable from both sides.
    pub fn new(id: usize, position: Point) -> Self {
        Self {
            id,
            position,
            left: true,
            right: true,
            weight: None,
        }
    }

    /// Creates a product from raw shelf coordinates.
    ///
    /// Shelf index `k` maps to grid coordinate `2k + 1` on both axes.
    pub fn from_shelf(id: usize, shelf_x: i32, shelf_y: i32) -> Self {
        Self::new(id, Point::new(2 * shelf_x + 1, 2 * shelf_y + 1))
    }

    /// Sets which sides of the slot are approachable.
    pub fn with_sides(mut self, left: bool, right: bool) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    /// Sets the product weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Product id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Slot position (a shelf cell).
    pub fn position(&self) -> Point {
        self.position
    }

    /// Weight, if known.
    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    /// Returns `true` if the slot can be picked from its left neighbor.
    pub fn left_open(&self) -> bool {
        self.left
    }

    /// Returns `true` if the slot can be picked from its right neighbor.
    pub fn right_open(&self) -> bool {
        self.right
    }

    /// The aisle node one column to the left of the slot.
    pub fn left_point(&self) -> Point {
        Point::new(self.position.x - 1, self.position.y)
    }

    /// The aisle node one column to the right of the slot.
    pub fn right_point(&self) -> Point {
        Point::new(self.position.x + 1, self.position.y)
    }

    /// The approachable sides, left first.
    pub fn approach_points(&self) -> impl Iterator<Item = Point> + '_ {
        let left = self.left.then(|| self.left_point());
        let right = self.right.then(|| self.right_point());
        left.into_iter().chain(right)
    }

    /// Resolves the aisle node to stand on when arriving from `from`.
    ///
    /// With both sides open, the left side is chosen when `from` lies strictly
    /// left of the slot, the right side otherwise. A single open side is
    /// always chosen.
    pub fn find_dest(&self, from: Point) -> Point {
        match (self.left, self.right) {
            (true, false) => self.left_point(),
            (false, true) => self.right_point(),
            _ if from.x < self.position.x => self.left_point(),
            _ => self.right_point(),
        }
    }
}

/// Something a route visits: a product slot or the start/end pseudo-node.
///
/// The pseudo-node lets route construction treat "go home" like any other
/// pick: arriving at it means standing on `entry`, and leaving it means
/// continuing from `exit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stop<'a> {
    /// A real slot.
    Slot(&'a Product),
    /// The worker's start/end location.
    Pseudo {
        /// Where the worker stands on arrival.
        entry: Point,
        /// Where the worker continues from.
        exit: Point,
    },
}

impl<'a> Stop<'a> {
    /// A pseudo-node that is entered and left at the same point.
    pub fn at(point: Point) -> Self {
        Stop::Pseudo {
            entry: point,
            exit: point,
        }
    }

    /// Aisle node reached when arriving from `from`.
    pub fn find_dest(&self, from: Point) -> Point {
        match self {
            Stop::Slot(product) => product.find_dest(from),
            Stop::Pseudo { entry, .. } => *entry,
        }
    }

    /// Point the worker continues from after arriving at `arrived`.
    pub fn departure(&self, arrived: Point) -> Point {
        match self {
            Stop::Slot(_) => arrived,
            Stop::Pseudo { exit, .. } => *exit,
        }
    }

    /// Points the worker may leave this stop from: the open sides of a slot,
    /// or the pseudo-node's exit.
    pub fn departure_points(&self) -> Vec<Point> {
        match self {
            Stop::Slot(product) => product.approach_points().collect(),
            Stop::Pseudo { exit, .. } => vec![*exit],
        }
    }

    /// The product behind this stop, if it is a real slot.
    pub fn product(&self) -> Option<&'a Product> {
        match self {
            Stop::Slot(product) => Some(product),
            Stop::Pseudo { .. } => None,
        }
    }

    /// Returns `true` for the pseudo-node.
    pub fn is_pseudo(&self) -> bool {
        matches!(self, Stop::Pseudo { .. })
    }
}
