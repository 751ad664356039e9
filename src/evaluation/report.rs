//! Human-readable route reports.

use std::fmt;

use crate::error::Result;
use crate::models::{Order, Path, Point};

use super::{Leg, RouteEffort, RouteEvaluator};

/// A fully evaluated route: legs, total length, and effort.
///
/// `Display` renders the walk turn by turn:
///
/// ```text
/// (0, 0)->(4, 0)->(4, 9)->[pick up 1 from (5, 9)]->(4, 9)->(4, 8)->(0, 8)->(0, 0)
/// ```
#[derive(Debug, Clone)]
pub struct RouteReport {
    legs: Vec<(Leg, Path)>,
    length: f64,
    effort: RouteEffort,
}

impl RouteReport {
    /// Evaluates `order` from `start` to `end`.
    pub fn new(
        evaluator: &RouteEvaluator<'_>,
        order: &Order,
        start: Point,
        end: Point,
    ) -> Result<Self> {
        let oracle = evaluator.warehouse().oracle();
        let legs: Vec<(Leg, Path)> = evaluator
            .legs(order, start, end)?
            .into_iter()
            .map(|leg| {
                let path = oracle.path(leg.from, leg.to);
                (leg, path)
            })
            .collect();
        let length = legs.iter().map(|(leg, _)| leg.distance).sum();
        let effort = evaluator.route_effort(order, start, end)?;
        Ok(Self {
            legs,
            length,
            effort,
        })
    }

    /// Total travel length.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Load-weighted effort.
    pub fn effort(&self) -> RouteEffort {
        self.effort
    }

    /// Legs with their turn-point paths.
    pub fn legs(&self) -> impl Iterator<Item = (&Leg, &Path)> {
        self.legs.iter().map(|(leg, path)| (leg, path))
    }
}

impl fmt::Display for RouteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, (leg, path)) in self.legs.iter().enumerate() {
            if k > 0 {
                write!(f, "->")?;
            }
            write!(f, "{path}")?;
            if let (Some(id), Some(slot)) = (leg.product_id, leg.slot) {
                write!(f, "->[pick up {id} from {slot}]")?;
            }
        }
        Ok(())
    }
}
