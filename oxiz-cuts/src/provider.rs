//! Read-only view of the arithmetic solver consumed by cut derivation.

use crate::dependency::{DepId, FactList};
use crate::numeric::InfRational;
use crate::term::{ColumnId, Row, Term};

/// A bound on a column together with its justification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    /// Bound value (strict bounds carry an infinitesimal).
    pub value: InfRational,
    /// Justification of the bound.
    pub dep: DepId,
}

impl Bound {
    /// Create a bound.
    pub fn new(value: InfRational, dep: DepId) -> Self {
        Self { value, dep }
    }
}

/// Which bound a non-basic column currently sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    /// At its lower bound.
    Lower,
    /// At its upper bound.
    Upper,
}

/// Capabilities the cut generator needs from the surrounding solver.
///
/// Nothing is ever mutated through this interface.
pub trait ColumnProvider {
    /// Current value of a column.
    fn value(&self, col: ColumnId) -> InfRational;

    /// Whether the column is integer-typed.
    fn is_int(&self, col: ColumnId) -> bool;

    /// Lower bound of a column, if any.
    fn lower_bound(&self, col: ColumnId) -> Option<&Bound>;

    /// Upper bound of a column, if any.
    fn upper_bound(&self, col: ColumnId) -> Option<&Bound>;

    /// Row defining a basic column, or `None` if the column is not basic.
    fn row_of(&self, basic: ColumnId) -> Option<&Row>;

    /// Expand a justification into atomic facts.
    fn flatten(&self, dep: DepId) -> FactList;

    /// Expand alias columns of `term` into base columns.
    fn unfold(&self, term: &Term) -> Term {
        term.clone()
    }

    /// Whether the lower and upper bound coincide.
    fn is_fixed(&self, col: ColumnId) -> bool {
        match (self.lower_bound(col), self.upper_bound(col)) {
            (Some(l), Some(u)) => l.value == u.value,
            _ => false,
        }
    }

    /// Whether the column's value equals its lower bound.
    fn at_lower(&self, col: ColumnId) -> bool {
        self.lower_bound(col)
            .is_some_and(|b| b.value == self.value(col))
    }

    /// Whether the column's value equals its upper bound.
    fn at_upper(&self, col: ColumnId) -> bool {
        self.upper_bound(col)
            .is_some_and(|b| b.value == self.value(col))
    }

    /// Whether the column only takes integer values: integer-typed, or fixed
    /// at an integral value.
    fn is_integral_column(&self, col: ColumnId) -> bool {
        self.is_int(col)
            || (self.is_fixed(col)
                && self
                    .lower_bound(col)
                    .is_some_and(|b| b.value.is_integral()))
    }

    /// The bound a column sits at, preferring the lower one.
    fn active_bound(&self, col: ColumnId) -> Option<(BoundSide, &Bound)> {
        if self.at_lower(col) {
            self.lower_bound(col).map(|b| (BoundSide::Lower, b))
        } else if self.at_upper(col) {
            self.upper_bound(col).map(|b| (BoundSide::Upper, b))
        } else {
            None
        }
    }
}
