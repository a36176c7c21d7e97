//! Boolean matrices with OR as addition and AND as multiplication.
//!
//! Rows are stored as bit vectors, so the product and the closure work on whole
//! rows at a time.

#![deny(unsafe_code)]

use std::fmt;

use bit_vec::BitVec;

/// A boolean matrix.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BoolMatrix {
    rows: Vec<BitVec>,
    num_cols: usize,
}

impl BoolMatrix {
    /// Creates a zero matrix.
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        BoolMatrix {
            rows: vec![BitVec::from_elem(num_cols, false); num_rows],
            num_cols,
        }
    }

    /// Creates a square zero matrix.
    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Creates the identity matrix.
    pub fn identity(size: usize) -> Self {
        let mut result = Self::square(size);
        for i in 0..size {
            result.set(i, i, true);
        }
        result
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns `(rows, columns)`.
    pub fn size(&self) -> (usize, usize) {
        (self.num_rows(), self.num_cols)
    }

    /// Reads an entry. Entries outside the matrix are `false`.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|bits| bits.get(col))
            .unwrap_or(false)
    }

    /// Writes an entry.
    ///
    /// # Panics
    ///
    /// Panics if the entry is outside the matrix.
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.rows[row].set(col, value);
    }

    /// The bits of one row.
    pub fn row(&self, row: usize) -> &BitVec {
        &self.rows[row]
    }

    /// ORs the given bits into a row. Returns whether the row changed.
    pub fn union_row(&mut self, row: usize, bits: &BitVec) -> bool {
        self.rows[row].or(bits)
    }

    /// Iterates over the columns set in a row.
    pub fn iter_row(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.rows[row]
            .iter()
            .enumerate()
            .filter_map(|(col, present)| if present { Some(col) } else { None })
    }

    /// Iterates over all `(row, col)` pairs that are set, row by row.
    pub fn iter_ones(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.num_rows()).flat_map(move |row| self.iter_row(row).map(move |col| (row, col)))
    }

    /// Number of entries set.
    pub fn count_ones(&self) -> usize {
        self.rows
            .iter()
            .map(|bits| bits.iter().filter(|&present| present).count())
            .sum()
    }

    /// Checks whether no entry is set.
    pub fn is_zero(&self) -> bool {
        self.rows.iter().all(|bits| bits.none())
    }

    /// ORs another matrix of the same size into this one. Returns whether any
    /// entry changed.
    pub fn union_with(&mut self, other: &BoolMatrix) -> bool {
        assert_eq!(self.size(), other.size(), "matrix sizes differ");
        let mut changed = false;
        for (row, other_row) in self.rows.iter_mut().zip(&other.rows) {
            changed |= row.or(other_row);
        }
        changed
    }

    /// Returns the entries of this matrix that are not set in `other`.
    pub fn difference(&self, other: &BoolMatrix) -> BoolMatrix {
        assert_eq!(self.size(), other.size(), "matrix sizes differ");
        let mut result = self.clone();
        for (row, other_row) in result.rows.iter_mut().zip(&other.rows) {
            row.difference(other_row);
        }
        result
    }

    /// Boolean matrix product.
    pub fn mul(&self, other: &BoolMatrix) -> BoolMatrix {
        assert_eq!(
            self.num_cols,
            other.num_rows(),
            "matrix sizes don't allow multiplication"
        );
        let mut result = BoolMatrix::new(self.num_rows(), other.num_cols);
        for (row, result_row) in self.rows.iter().zip(result.rows.iter_mut()) {
            for (k, present) in row.iter().enumerate() {
                if present {
                    result_row.or(&other.rows[k]);
                }
            }
        }
        result
    }

    /// Kronecker product. Entry `(i, j)` of `self` and `(k, l)` of `other` give
    /// entry `(i * other.rows + k, j * other.cols + l)`.
    pub fn kron(&self, other: &BoolMatrix) -> BoolMatrix {
        let (rows, cols) = other.size();
        let mut result = BoolMatrix::new(self.num_rows() * rows, self.num_cols * cols);
        for (i, j) in self.iter_ones() {
            for (k, l) in other.iter_ones() {
                result.set(i * rows + k, j * cols + l, true);
            }
        }
        result
    }

    /// Block-diagonal matrix with `self` in the upper left and `other` in the
    /// lower right.
    pub fn direct_sum(&self, other: &BoolMatrix) -> BoolMatrix {
        let (rows, cols) = self.size();
        let mut result = BoolMatrix::new(rows + other.num_rows(), cols + other.num_cols);
        for (i, j) in self.iter_ones() {
            result.set(i, j, true);
        }
        for (i, j) in other.iter_ones() {
            result.set(rows + i, cols + j, true);
        }
        result
    }

    /// Computes the transitive closure of a square matrix in place.
    pub fn transitive_closure(&mut self) {
        assert_eq!(self.num_rows(), self.num_cols, "matrix is not square");
        for k in 0..self.num_rows() {
            let row_k = self.rows[k].clone();
            for row in &mut self.rows {
                if row[k] {
                    row.or(&row_k);
                }
            }
        }
    }
}

impl fmt::Debug for BoolMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (rows, cols) = self.size();
        write!(f, "BoolMatrix({}x{}) ", rows, cols)?;
        f.debug_list().entries(self.iter_ones()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn from_pairs(rows: usize, cols: usize, pairs: &[(usize, usize)]) -> BoolMatrix {
        let mut m = BoolMatrix::new(rows, cols);
        for &(i, j) in pairs {
            m.set(i, j, true);
        }
        m
    }

    #[test]
    fn test_mul() {
        let a = from_pairs(2, 3, &[(0, 1), (1, 2)]);
        let b = from_pairs(3, 2, &[(1, 0), (2, 0), (2, 1)]);
        let product = a.mul(&b);
        assert_eq!(product.iter_ones().collect::<Vec<_>>(), vec![(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_identity_is_neutral() {
        let a = from_pairs(3, 3, &[(0, 1), (2, 2)]);
        assert_eq!(a.mul(&BoolMatrix::identity(3)), a);
        assert_eq!(BoolMatrix::identity(3).mul(&a), a);
    }

    #[test]
    fn test_kron() {
        let a = from_pairs(2, 2, &[(0, 1)]);
        let b = from_pairs(3, 3, &[(1, 2), (2, 0)]);
        let product = a.kron(&b);
        assert_eq!(product.size(), (6, 6));
        assert_eq!(product.iter_ones().collect::<Vec<_>>(), vec![(1, 5), (2, 3)]);
    }

    #[test]
    fn test_direct_sum() {
        let a = from_pairs(1, 1, &[(0, 0)]);
        let b = from_pairs(2, 2, &[(0, 1)]);
        let sum = a.direct_sum(&b);
        assert_eq!(sum.size(), (3, 3));
        assert_eq!(sum.iter_ones().collect::<Vec<_>>(), vec![(0, 0), (1, 2)]);
    }

    #[test_case(&[(0, 1), (1, 2)], &[(0, 1), (0, 2), (1, 2)] ; "chain")]
    #[test_case(&[(0, 1), (1, 0)], &[(0, 0), (0, 1), (1, 0), (1, 1)] ; "cycle")]
    #[test_case(&[], &[] ; "empty")]
    fn test_transitive_closure(pairs: &[(usize, usize)], expected: &[(usize, usize)]) {
        let mut m = from_pairs(3, 3, pairs);
        m.transitive_closure();
        assert_eq!(m.iter_ones().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_union_and_difference() {
        let mut a = from_pairs(2, 2, &[(0, 0)]);
        let b = from_pairs(2, 2, &[(0, 0), (1, 1)]);
        assert_eq!(b.difference(&a).iter_ones().collect::<Vec<_>>(), vec![(1, 1)]);
        assert!(a.union_with(&b));
        assert!(!a.union_with(&b));
        assert_eq!(a.count_ones(), 2);
        assert!(!a.is_zero());
        assert!(BoolMatrix::new(2, 5).is_zero());
    }
}
