//! Dense distance matrix.

/// A dense n×n matrix of travel costs stored in row-major order.
///
/// Entries may be `f64::INFINITY` to mark forbidden transitions.
///
/// # Examples
///
/// ```
/// use u_picking::distance::DistanceMatrix;
///
/// let mut dm = DistanceMatrix::filled(3, f64::INFINITY);
/// dm.set(0, 1, 5.0);
/// dm.set(0, 2, 3.0);
/// assert_eq!(dm.row_min(0), Some(3.0));
/// assert_eq!(dm.row_min(1), None);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self::filled(size, 0.0)
    }

    /// Creates a distance matrix with every entry set to `value`.
    pub fn filled(size: usize, value: f64) -> Self {
        Self {
            data: vec![value; size * size],
            size,
        }
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the cost from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        self.data[from * self.size + to] = cost;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row `from` as a slice.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Sets every entry of row `from` to `value`.
    pub fn fill_row(&mut self, from: usize, value: f64) {
        let n = self.size;
        self.data[from * n..(from + 1) * n].fill(value);
    }

    /// Sets every entry of column `to` to `value`.
    pub fn fill_column(&mut self, to: usize, value: f64) {
        for from in 0..self.size {
            self.set(from, to, value);
        }
    }

    /// Smallest finite entry of a row, or `None` if the row is all infinite.
    pub fn row_min(&self, from: usize) -> Option<f64> {
        finite_min(self.row(from).iter().copied())
    }

    /// Smallest finite entry of a column, or `None` if the column is all infinite.
    pub fn column_min(&self, to: usize) -> Option<f64> {
        finite_min((0..self.size).map(|from| self.get(from, to)))
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    ///
    /// Infinite entries compare equal to each other.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let (a, b) = (self.get(i, j), self.get(j, i));
                if a == b {
                    continue;
                }
                if (a - b).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

fn finite_min(values: impl Iterator<Item = f64>) -> Option<f64> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<f64>, v| match acc {
            Some(m) if m <= v => Some(m),
            _ => Some(v),
        })
}
