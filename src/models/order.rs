//! Items and picking orders.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One line of a picking run: a product and the customer order it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Item {
    /// Product to pick.
    pub product_id: usize,
    /// Customer order the pick belongs to.
    pub order_id: usize,
}

impl Item {
    /// Creates an item.
    pub fn new(product_id: usize, order_id: usize) -> Self {
        Self {
            product_id,
            order_id,
        }
    }
}

/// An ordered sequence of items forming one picking run.
///
/// Optimizers only reorder; the multiset of items never changes.
///
/// # Examples
///
/// ```
/// use u_picking::models::Order;
///
/// let order = Order::from_products(&[3, 1, 2], 0);
/// assert_eq!(order.len(), 3);
/// assert_eq!(order.product_ids(), vec![3, 1, 2]);
/// assert_eq!(order.to_string(), "3, 1, 2");
///
/// let reordered = order.permuted(&[1, 2, 0]);
/// assert_eq!(reordered.product_ids(), vec![1, 2, 3]);
/// assert!(reordered.is_permutation_of(&order));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    items: Vec<Item>,
}

impl Order {
    /// Creates an order from items.
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Creates an order whose items all belong to the same customer order.
    pub fn from_products(product_ids: &[usize], order_id: usize) -> Self {
        product_ids
            .iter()
            .map(|&id| Item::new(id, order_id))
            .collect()
    }

    /// Items in visiting order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the order has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates items in visiting order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Product ids in visiting order.
    pub fn product_ids(&self) -> Vec<usize> {
        self.items.iter().map(|i| i.product_id).collect()
    }

    /// Builds a new order visiting `self.items()[indices[k]]` at position `k`.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds.
    pub fn permuted(&self, indices: &[usize]) -> Self {
        indices.iter().map(|&i| self.items[i]).collect()
    }

    /// Returns `true` if both orders hold the same multiset of items.
    pub fn is_permutation_of(&self, other: &Order) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut a = self.items.clone();
        let mut b = other.items.clone();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }
}

impl FromIterator<Item> for Order {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Order {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, item) in self.items.iter().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item.product_id)?;
        }
        Ok(())
    }
}
