//! Warehouse construction: product catalog plus distance oracle.

use std::collections::HashMap;

use log::debug;

use crate::distance::{DistanceOracle, LayoutConfig};
use crate::error::{Error, Result};
use crate::models::{Order, Point, Product, Stop};

/// An immutable warehouse: its layout, distance oracle, and product catalog.
///
/// This is the shared, read-only state every route operation works against.
///
/// # Examples
///
/// ```
/// use u_picking::distance::LayoutConfig;
/// use u_picking::models::{Point, Product};
/// use u_picking::Warehouse;
///
/// let warehouse = Warehouse::new(
///     LayoutConfig::default(),
///     vec![Product::from_shelf(1, 2, 4), Product::from_shelf(2, 10, 3)],
/// )
/// .unwrap();
/// assert_eq!(warehouse.product(1).unwrap().position(), Point::new(5, 9));
/// assert!(warehouse.product(99).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Warehouse {
    oracle: DistanceOracle,
    products: HashMap<usize, Product>,
}

impl Warehouse {
    /// Builds the distance oracle for `layout` and registers `products`.
    pub fn new(layout: LayoutConfig, products: impl IntoIterator<Item = Product>) -> Result<Self> {
        let oracle = DistanceOracle::build(layout)?;
        Self::with_oracle(oracle, products)
    }

    /// Registers `products` against an already built oracle.
    ///
    /// Fails on duplicate ids, on slots without a reachable open side, and on
    /// negative or non-finite weights.
    pub fn with_oracle(
        oracle: DistanceOracle,
        products: impl IntoIterator<Item = Product>,
    ) -> Result<Self> {
        let mut catalog = HashMap::new();
        for product in products {
            let sides: Vec<Point> = product.approach_points().collect();
            if sides.is_empty() || !sides.iter().all(|&p| oracle.covers(p)) {
                return Err(Error::InvalidSlot {
                    id: product.id(),
                    position: product.position(),
                });
            }
            if product.weight().is_some_and(|w| !w.is_finite() || w < 0.0) {
                return Err(Error::InvalidWeight { id: product.id() });
            }
            let id = product.id();
            if catalog.insert(id, product).is_some() {
                return Err(Error::DuplicateProduct { id });
            }
        }
        debug!("warehouse catalog holds {} products", catalog.len());
        Ok(Self {
            oracle,
            products: catalog,
        })
    }

    /// The distance oracle.
    pub fn oracle(&self) -> &DistanceOracle {
        &self.oracle
    }

    /// The grid layout.
    pub fn layout(&self) -> &LayoutConfig {
        self.oracle.layout()
    }

    /// Number of products in the catalog.
    pub fn num_products(&self) -> usize {
        self.products.len()
    }

    /// Looks up a product.
    pub fn product(&self, id: usize) -> Result<&Product> {
        self.products.get(&id).ok_or(Error::UnknownProduct { id })
    }

    /// Iterates the catalog in arbitrary order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Oracle distance between two validated aisle nodes.
    pub(crate) fn distance(&self, from: Point, to: Point) -> f64 {
        self.oracle.distance(from, to)
    }

    /// Checks that `p` is an in-bounds aisle node.
    pub fn check_point(&self, p: Point) -> Result<()> {
        self.layout().check_aisle_node(p)
    }

    /// Checks that a route request is well formed.
    ///
    /// The order must be non-empty, every product known, and both endpoints
    /// in-bounds aisle nodes.
    pub fn check_route(&self, order: &Order, start: Point, end: Point) -> Result<()> {
        if order.is_empty() {
            return Err(Error::EmptyOrder);
        }
        self.check_point(start)?;
        self.check_point(end)?;
        for item in order {
            self.product(item.product_id)?;
        }
        Ok(())
    }

    /// Resolves an order's items to route stops, in order.
    pub fn stops(&self, order: &Order) -> Result<Vec<Stop<'_>>> {
        order
            .iter()
            .map(|item| self.product(item.product_id).map(Stop::Slot))
            .collect()
    }

    /// Total weight of an order's products.
    ///
    /// The flag is `true` if any product lacks weight data; such products
    /// count as zero.
    pub fn order_weight(&self, order: &Order) -> Result<(f64, bool)> {
        let mut total = 0.0;
        let mut missing = false;
        for item in order {
            match self.product(item.product_id)?.weight() {
                Some(w) => total += w,
                None => missing = true,
            }
        }
        Ok((total, missing))
    }
}
