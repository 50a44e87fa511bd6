//! Linear terms and tableau rows.

use crate::numeric::InfRational;
use num_rational::BigRational;
use num_traits::Zero;
use rustc_hash::FxHashMap;

/// Column identifier in the arithmetic solver's variable space.
pub type ColumnId = usize;

/// A linear term `Σ coeff·column` with insertion-ordered iteration.
///
/// Adding a monomial on a column already present sums the coefficients; a
/// column whose coefficient cancels to zero is dropped.
#[derive(Debug, Clone, Default)]
pub struct Term {
    /// Monomials in insertion order.
    coeffs: Vec<(ColumnId, BigRational)>,
    /// Position of each column in `coeffs`.
    index: FxHashMap<ColumnId, usize>,
}

impl Term {
    /// Create an empty term.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `coeff·col` to the term.
    pub fn add_monomial(&mut self, coeff: BigRational, col: ColumnId) {
        if coeff.is_zero() {
            return;
        }
        if let Some(pos) = self.index.get(&col).copied() {
            self.coeffs[pos].1 += coeff;
            if self.coeffs[pos].1.is_zero() {
                self.coeffs.remove(pos);
                self.reindex();
            }
        } else {
            self.index.insert(col, self.coeffs.len());
            self.coeffs.push((col, coeff));
        }
    }

    /// Remove all monomials.
    pub fn clear(&mut self) {
        self.coeffs.clear();
        self.index.clear();
    }

    /// Number of monomials.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Check if the term has no monomials.
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Coefficient of `col`, if present.
    pub fn coeff(&self, col: ColumnId) -> Option<&BigRational> {
        self.index.get(&col).map(|&pos| &self.coeffs[pos].1)
    }

    /// Iterate `(column, coefficient)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ColumnId, &BigRational)> {
        self.coeffs.iter().map(|(col, c)| (*col, c))
    }

    /// Monomials as `(coefficient, column)` pairs.
    pub fn to_pairs(&self) -> Vec<(BigRational, ColumnId)> {
        self.coeffs.iter().map(|(col, c)| (c.clone(), *col)).collect()
    }

    /// Evaluate the term under `value`.
    pub fn evaluate<F>(&self, mut value: F) -> InfRational
    where
        F: FnMut(ColumnId) -> InfRational,
    {
        let mut acc = InfRational::zero();
        for (col, c) in &self.coeffs {
            acc += &value(*col).scale(c);
        }
        acc
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (pos, (col, _)) in self.coeffs.iter().enumerate() {
            self.index.insert(*col, pos);
        }
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.coeffs == other.coeffs
    }
}

impl Eq for Term {}

impl FromIterator<(BigRational, ColumnId)> for Term {
    fn from_iter<I: IntoIterator<Item = (BigRational, ColumnId)>>(iter: I) -> Self {
        let mut term = Term::new();
        for (c, col) in iter {
            term.add_monomial(c, col);
        }
        term
    }
}

/// One entry of a tableau row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEntry {
    /// Coefficient.
    pub coeff: BigRational,
    /// Column.
    pub col: ColumnId,
}

/// A tableau row: the equality `Σ coeff·column = 0`.
///
/// The row of a basic column contains that column with coefficient one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    entries: Vec<RowEntry>,
}

impl Row {
    /// Create a row from its entries.
    pub fn new(entries: Vec<RowEntry>) -> Self {
        Self { entries }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the row has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, RowEntry> {
        self.entries.iter()
    }

    /// Coefficient of `col` in the row, if present.
    pub fn coeff(&self, col: ColumnId) -> Option<&BigRational> {
        self.entries.iter().find(|e| e.col == col).map(|e| &e.coeff)
    }
}

impl FromIterator<(BigRational, ColumnId)> for Row {
    fn from_iter<I: IntoIterator<Item = (BigRational, ColumnId)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(coeff, col)| RowEntry { coeff, col })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a RowEntry;
    type IntoIter = std::slice::Iter<'a, RowEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
