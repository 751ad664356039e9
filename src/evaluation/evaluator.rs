//! Route evaluator that chains oracle lookups along a visiting order.

use log::warn;

use crate::error::Result;
use crate::models::{Order, Point, Stop};
use crate::Warehouse;

/// One leg of a route: walking from one standing point to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Standing point the leg starts from.
    pub from: Point,
    /// Standing point the leg ends at.
    pub to: Point,
    /// Oracle distance of the leg.
    pub distance: f64,
    /// Product picked at the end of the leg; `None` for the walk to the end point.
    pub product_id: Option<usize>,
    /// Slot position of the picked product.
    pub slot: Option<Point>,
}

/// Load-weighted effort of a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteEffort {
    /// Sum over legs of leg distance times the weight carried on that leg.
    pub effort: f64,
    /// `true` if some product had no weight; `effort` is then a lower bound.
    pub missing_weight: bool,
}

/// Evaluates visiting orders against a warehouse.
///
/// Each item's standing point is resolved from the previous standing point
/// with [`Stop::find_dest`], so the same order always yields the same legs.
///
/// # Examples
///
/// ```
/// use u_picking::distance::LayoutConfig;
/// use u_picking::evaluation::RouteEvaluator;
/// use u_picking::models::{Order, Point, Product};
/// use u_picking::Warehouse;
///
/// let wh = Warehouse::new(LayoutConfig::default(), vec![Product::from_shelf(1, 2, 4)]).unwrap();
/// let eval = RouteEvaluator::new(&wh);
/// let origin = Point::new(0, 0);
/// let len = eval.route_length(&Order::from_products(&[1], 0), origin, origin).unwrap();
/// // (0,0) -> (4,9) is 13, and back (4,9) -> (4,8) -> (0,8) -> (0,0) is 13.
/// assert!((len - 26.0).abs() < 1e-10);
/// ```
pub struct RouteEvaluator<'a> {
    warehouse: &'a Warehouse,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates an evaluator for the given warehouse.
    pub fn new(warehouse: &'a Warehouse) -> Self {
        Self { warehouse }
    }

    /// The warehouse being evaluated against.
    pub fn warehouse(&self) -> &'a Warehouse {
        self.warehouse
    }

    /// Total travel length of `order` from `start` to `end`.
    pub fn route_length(&self, order: &Order, start: Point, end: Point) -> Result<f64> {
        self.warehouse.check_route(order, start, end)?;
        let stops = self.warehouse.stops(order)?;
        let sequence: Vec<usize> = (0..stops.len()).collect();
        Ok(self.sequence_length(&stops, &sequence, start, end))
    }

    /// Load-weighted effort of `order` from `start` to `end`.
    ///
    /// The first leg carries nothing; every later leg carries the summed
    /// weight of all items picked before it. Products without weight data
    /// count as weightless and set [`RouteEffort::missing_weight`].
    pub fn route_effort(&self, order: &Order, start: Point, end: Point) -> Result<RouteEffort> {
        let legs = self.legs(order, start, end)?;
        let mut carried = 0.0;
        let mut effort = 0.0;
        let mut missing_weight = false;
        for leg in &legs {
            effort += leg.distance * carried;
            if let Some(id) = leg.product_id {
                match self.warehouse.product(id)?.weight() {
                    Some(w) => carried += w,
                    None => missing_weight = true,
                }
            }
        }
        if missing_weight {
            warn!("route effort computed with missing product weights; result is a lower bound");
        }
        Ok(RouteEffort {
            effort,
            missing_weight,
        })
    }

    /// Breaks `order` into legs, including the final walk to `end`.
    pub fn legs(&self, order: &Order, start: Point, end: Point) -> Result<Vec<Leg>> {
        self.warehouse.check_route(order, start, end)?;
        let mut legs = Vec::with_capacity(order.len() + 1);
        let mut pos = start;
        for stop in self.warehouse.stops(order)? {
            let dest = stop.find_dest(pos);
            let product = stop.product();
            legs.push(Leg {
                from: pos,
                to: dest,
                distance: self.warehouse.distance(pos, dest),
                product_id: product.map(|p| p.id()),
                slot: product.map(|p| p.position()),
            });
            pos = stop.departure(dest);
        }
        legs.push(Leg {
            from: pos,
            to: end,
            distance: self.warehouse.distance(pos, end),
            product_id: None,
            slot: None,
        });
        Ok(legs)
    }

    /// Route length of `stops` visited in `sequence` order.
    ///
    /// Inputs must already be validated.
    pub(crate) fn sequence_length(
        &self,
        stops: &[Stop<'_>],
        sequence: &[usize],
        start: Point,
        end: Point,
    ) -> f64 {
        let mut pos = start;
        let mut total = 0.0;
        for &k in sequence {
            let stop = &stops[k];
            let dest = stop.find_dest(pos);
            total += self.warehouse.distance(pos, dest);
            pos = stop.departure(dest);
        }
        total + self.warehouse.distance(pos, end)
    }
}
