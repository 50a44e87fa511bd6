//! In-memory tableau snapshot.
//!
//! A self-contained [`ColumnProvider`] holding column values, integrality,
//! bounds with justifications, the rows of basic columns and alias columns
//! (columns defined as linear combinations of other columns). Solvers that
//! keep their own tableau implement [`ColumnProvider`] directly; this type
//! serves callers that assemble a snapshot by hand.

use crate::dependency::{DepId, DependencyArena, FactId, FactList};
use crate::numeric::InfRational;
use crate::provider::{Bound, ColumnProvider};
use crate::term::{ColumnId, Row, Term};
use num_rational::BigRational;
use num_traits::{One, Zero};
use rustc_hash::FxHashMap;

/// Per-column state.
#[derive(Debug, Clone)]
pub struct ColumnInfo {
    /// Current value.
    pub value: InfRational,
    /// Integer-typed column.
    pub is_int: bool,
    /// Lower bound.
    pub lower: Option<Bound>,
    /// Upper bound.
    pub upper: Option<Bound>,
}

/// Tableau snapshot.
#[derive(Debug, Clone, Default)]
pub struct Tableau {
    columns: Vec<ColumnInfo>,
    /// Rows keyed by their basic column.
    rows: FxHashMap<ColumnId, Row>,
    /// Alias column -> defining linear combination.
    aliases: FxHashMap<ColumnId, Vec<(BigRational, ColumnId)>>,
    deps: DependencyArena,
}

impl Tableau {
    /// Create an empty tableau.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an integer-typed column with value zero.
    pub fn add_int_column(&mut self) -> ColumnId {
        self.add_column(true)
    }

    /// Add a real-typed column with value zero.
    pub fn add_real_column(&mut self) -> ColumnId {
        self.add_column(false)
    }

    /// Add a column with value zero.
    pub fn add_column(&mut self, is_int: bool) -> ColumnId {
        let id = self.columns.len();
        self.columns.push(ColumnInfo {
            value: InfRational::zero(),
            is_int,
            lower: None,
            upper: None,
        });
        id
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column state.
    pub fn column(&self, col: ColumnId) -> Option<&ColumnInfo> {
        self.columns.get(col)
    }

    /// Set the current value of a column.
    pub fn set_value(&mut self, col: ColumnId, value: impl Into<InfRational>) {
        self.columns[col].value = value.into();
    }

    /// Set the lower bound, justified by the atomic fact `fact`.
    pub fn set_lower(&mut self, col: ColumnId, value: impl Into<InfRational>, fact: FactId) -> DepId {
        let dep = self.deps.mk_leaf(fact);
        self.set_lower_dep(col, value, dep);
        dep
    }

    /// Set the upper bound, justified by the atomic fact `fact`.
    pub fn set_upper(&mut self, col: ColumnId, value: impl Into<InfRational>, fact: FactId) -> DepId {
        let dep = self.deps.mk_leaf(fact);
        self.set_upper_dep(col, value, dep);
        dep
    }

    /// Set the lower bound with an existing justification.
    pub fn set_lower_dep(&mut self, col: ColumnId, value: impl Into<InfRational>, dep: DepId) {
        self.columns[col].lower = Some(Bound::new(value.into(), dep));
    }

    /// Set the upper bound with an existing justification.
    pub fn set_upper_dep(&mut self, col: ColumnId, value: impl Into<InfRational>, dep: DepId) {
        self.columns[col].upper = Some(Bound::new(value.into(), dep));
    }

    /// Fix a column: both bounds and the value become `value`.
    pub fn fix(
        &mut self,
        col: ColumnId,
        value: impl Into<InfRational>,
        lower_fact: FactId,
        upper_fact: FactId,
    ) {
        let value = value.into();
        self.set_lower(col, value.clone(), lower_fact);
        self.set_upper(col, value.clone(), upper_fact);
        self.set_value(col, value);
    }

    /// Justification arena, for building derived justifications.
    pub fn deps_mut(&mut self) -> &mut DependencyArena {
        &mut self.deps
    }

    /// Register the row of a basic column.
    pub fn add_row(&mut self, basic: ColumnId, row: Row) {
        debug_assert!(
            row.coeff(basic).is_some_and(|c| c.is_one()),
            "basic column must appear in its row with coefficient one"
        );
        self.rows.insert(basic, row);
    }

    /// Recompute a basic column's value from its row.
    ///
    /// Returns the new value, or `None` if `basic` has no row.
    pub fn derive_basic_value(&mut self, basic: ColumnId) -> Option<InfRational> {
        let row = self.rows.get(&basic)?;
        let mut sum = InfRational::zero();
        for entry in row {
            if entry.col != basic {
                sum += &self.columns[entry.col].value.scale(&entry.coeff);
            }
        }
        let value = -sum;
        self.columns[basic].value = value.clone();
        Some(value)
    }

    /// Define `alias` as the linear combination `definition`.
    ///
    /// The alias takes the value of the combination under the current
    /// assignment. Definitions may only refer to earlier columns.
    pub fn define_alias(&mut self, alias: ColumnId, definition: Vec<(BigRational, ColumnId)>) {
        debug_assert!(definition.iter().all(|(_, c)| *c < alias));
        let mut value = InfRational::zero();
        for (c, col) in &definition {
            value += &self.columns[*col].value.scale(c);
        }
        self.columns[alias].value = value;
        self.aliases.insert(alias, definition);
    }

    fn unfold_into(&self, coeff: &BigRational, col: ColumnId, out: &mut Term) {
        match self.aliases.get(&col) {
            Some(definition) => {
                for (c, base) in definition {
                    self.unfold_into(&(coeff * c), *base, out);
                }
            }
            None => out.add_monomial(coeff.clone(), col),
        }
    }
}

impl ColumnProvider for Tableau {
    fn value(&self, col: ColumnId) -> InfRational {
        self.columns
            .get(col)
            .map(|c| c.value.clone())
            .unwrap_or_else(InfRational::zero)
    }

    fn is_int(&self, col: ColumnId) -> bool {
        self.columns.get(col).is_some_and(|c| c.is_int)
    }

    fn lower_bound(&self, col: ColumnId) -> Option<&Bound> {
        self.columns.get(col)?.lower.as_ref()
    }

    fn upper_bound(&self, col: ColumnId) -> Option<&Bound> {
        self.columns.get(col)?.upper.as_ref()
    }

    fn row_of(&self, basic: ColumnId) -> Option<&Row> {
        self.rows.get(&basic)
    }

    fn flatten(&self, dep: DepId) -> FactList {
        self.deps.flatten(dep)
    }

    fn unfold(&self, term: &Term) -> Term {
        let mut out = Term::new();
        for (col, c) in term.iter() {
            if c.is_zero() {
                continue;
            }
            self.unfold_into(c, col, &mut out);
        }
        out
    }
}
