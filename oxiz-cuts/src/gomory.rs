//! Gomory Cut Generation for Linear Integer Arithmetic.
//!
//! Given an integer basic column whose simplex value is fractional, derive an
//! inequality `term >= k` that
//! - follows from the column's row and the bounds listed in its explanation,
//! - holds at every point where integer columns take integer values,
//! - is violated by the current assignment.
//!
//! The derivation walks the row once, applying the mixed-integer rounding
//! rules of [`crate::rules`] to each non-basic column. Fixed columns are
//! constants and only contribute their bounds to the explanation. When integer
//! columns with fractional row coefficients take part, or when real bounds
//! leave `k` fractional, the resulting inequality is normalized by
//! [`simplify_inequality`].
//!
//! ## Outcomes
//!
//! - [`CutOutcome::Cut`]: the caller adds `¬(∧ explanation) ∨ (term >= k)`.
//! - [`CutOutcome::Conflict`]: the explanation alone proves `0 >= k` with
//!   `k > 0`.
//! - [`CutOutcome::Undef`]: the derivation was abandoned (coefficient growth
//!   or a row column off its bounds); the caller should branch instead.
//!
//! ## References
//!
//! - Dutertre & de Moura: "Integrating Simplex with DPLL(T)" (2006)
//! - Z3's `math/lp/gomory.cpp`

use crate::error::{CutError, CutResult};
use crate::explanation::Explanation;
use crate::guard::{CoefficientOverflow, OverflowGuard};
use crate::numeric::{fractional_part, InfRational};
use crate::provider::{Bound, BoundSide, ColumnProvider};
use crate::rules::{int_coefficient, real_coefficient, PivotFraction};
use crate::simplify::simplify_inequality;
use crate::term::{ColumnId, Row, RowEntry, Term};
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;
use tracing::{debug, trace, warn};

/// Configuration for Gomory cut generation.
#[derive(Debug, Clone)]
pub struct GomoryConfig {
    /// Abandon cuts whose coefficients outgrow the row (see [`OverflowGuard`]).
    pub small_cuts: bool,
}

impl Default for GomoryConfig {
    fn default() -> Self {
        Self { small_cuts: true }
    }
}

/// Gomory cut statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GomoryStats {
    /// Cuts produced.
    pub cuts: usize,
    /// Conflicts detected.
    pub conflicts: usize,
    /// Derivations abandoned.
    pub overflow_aborts: usize,
    /// Cuts passed through the simplifier.
    pub simplified: usize,
    /// Pivot columns rejected by [`GomoryCutGenerator::get_cut`].
    pub rejected_targets: usize,
}

/// A derived cut `term >= k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cut {
    /// Left-hand side.
    pub term: Term,
    /// Right-hand side, always an integer.
    pub k: BigRational,
    /// Bound facts the cut depends on.
    pub explanation: Explanation,
}

impl Cut {
    /// Whether the provider's current assignment violates the cut.
    pub fn is_violated_by<P: ColumnProvider + ?Sized>(&self, provider: &P) -> bool {
        self.term.evaluate(|col| provider.value(col)) < InfRational::from_rational(self.k.clone())
    }

    /// Whether the cut holds under a rational assignment.
    pub fn holds_at<F>(&self, mut assignment: F) -> bool
    where
        F: FnMut(ColumnId) -> BigRational,
    {
        let lhs = self
            .term
            .iter()
            .fold(BigRational::zero(), |acc, (col, c)| acc + c * assignment(col));
        lhs >= self.k
    }
}

impl fmt::Display for Cut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.term.is_empty() {
            write!(f, "0")?;
        }
        for (i, (col, c)) in self.term.iter().enumerate() {
            if i == 0 {
                write!(f, "{}*x{}", c, col)?;
            } else if c.is_negative() {
                write!(f, " - {}*x{}", -c, col)?;
            } else {
                write!(f, " + {}*x{}", c, col)?;
            }
        }
        write!(f, " >= {}", self.k)
    }
}

/// Result of a cut derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CutOutcome {
    /// A valid cut separating the current assignment.
    Cut(Cut),
    /// The explanation proves `0 >= k` with `k > 0`.
    Conflict {
        /// Contradictory bound facts.
        explanation: Explanation,
        /// Right-hand side of the empty inequality.
        k: BigRational,
    },
    /// No cut; all partial work was discarded.
    Undef,
}

impl CutOutcome {
    /// Check if a cut was produced.
    pub fn is_cut(&self) -> bool {
        matches!(self, CutOutcome::Cut(_))
    }

    /// Check if a conflict was found.
    pub fn is_conflict(&self) -> bool {
        matches!(self, CutOutcome::Conflict { .. })
    }

    /// Check if the derivation was abandoned.
    pub fn is_undef(&self) -> bool {
        matches!(self, CutOutcome::Undef)
    }

    /// The cut, if one was produced.
    pub fn cut(&self) -> Option<&Cut> {
        match self {
            CutOutcome::Cut(cut) => Some(cut),
            _ => None,
        }
    }
}

/// Read-only observer of derivation outcomes.
///
/// Called after the outcome is fixed; observers cannot alter it.
pub trait CutObserver {
    /// A cut was produced for `pivot`.
    fn on_cut(&mut self, _pivot: ColumnId, _row: &Row, _cut: &Cut) {}

    /// A conflict was found while cutting on `pivot`.
    fn on_conflict(&mut self, _pivot: ColumnId, _explanation: &Explanation) {}

    /// The derivation for `pivot` was abandoned.
    fn on_undef(&mut self, _pivot: ColumnId) {}
}

/// Why a derivation was abandoned.
#[derive(Debug)]
enum Abort {
    Overflow(CoefficientOverflow),
    OffBound(ColumnId),
}

/// Per-call derivation state.
struct CutBuilder<'a, P: ?Sized> {
    provider: &'a P,
    pf: PivotFraction,
    guard: OverflowGuard,
    term: Term,
    k: BigRational,
    explanation: Explanation,
    has_int_columns: bool,
}

impl<'a, P: ColumnProvider + ?Sized> CutBuilder<'a, P> {
    fn new(provider: &'a P, pf: PivotFraction, guard: OverflowGuard) -> Self {
        Self {
            provider,
            pf,
            guard,
            term: Term::new(),
            k: BigRational::one(),
            explanation: Explanation::new(),
            has_int_columns: false,
        }
    }

    fn add_entry(&mut self, entry: &RowEntry) -> Result<(), Abort> {
        let col = entry.col;
        let provider = self.provider;

        if provider.is_fixed(col) {
            for bound in [provider.lower_bound(col), provider.upper_bound(col)]
                .into_iter()
                .flatten()
            {
                self.explanation.push_dep(provider, bound.dep);
            }
            return Ok(());
        }

        let is_int = provider.is_integral_column(col);
        if is_int && entry.coeff.is_integer() {
            // contributes an integer to the pivot wherever it sits
            return Ok(());
        }

        let Some((side, bound)) = provider.active_bound(col) else {
            return Err(Abort::OffBound(col));
        };

        let new_a = if is_int {
            self.has_int_columns = true;
            let fj = fractional_part(&-&entry.coeff);
            int_coefficient(&fj, side, &self.pf)
        } else {
            real_coefficient(&-&entry.coeff, side, &self.pf)
        };

        self.push_monomial(new_a, col, side, bound)
    }

    fn push_monomial(
        &mut self,
        new_a: BigRational,
        col: ColumnId,
        side: BoundSide,
        bound: &Bound,
    ) -> Result<(), Abort> {
        // new_a·(x - bound) contributes new_a·bound to k
        self.k += &new_a * &bound.value.x;
        self.explanation.push_dep(self.provider, bound.dep);
        trace!(col, ?side, coeff = %new_a, k = %self.k, "gomory column");
        let check = self.guard.check(&new_a);
        self.term.add_monomial(new_a, col);
        check.map_err(Abort::Overflow)
    }

    fn discard(&mut self) {
        self.term.clear();
        self.explanation.clear();
        self.k = BigRational::one();
    }
}

/// Gomory cut generator.
pub struct GomoryCutGenerator {
    config: GomoryConfig,
    stats: GomoryStats,
    observer: Option<Box<dyn CutObserver>>,
}

impl fmt::Debug for GomoryCutGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GomoryCutGenerator")
            .field("config", &self.config)
            .field("stats", &self.stats)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Default for GomoryCutGenerator {
    fn default() -> Self {
        Self::new(GomoryConfig::default())
    }
}

impl GomoryCutGenerator {
    /// Create a new generator.
    pub fn new(config: GomoryConfig) -> Self {
        Self {
            config,
            stats: GomoryStats::default(),
            observer: None,
        }
    }

    /// Install an observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: Box<dyn CutObserver>) {
        self.observer = Some(observer);
    }

    /// Remove the observer.
    pub fn clear_observer(&mut self) -> Option<Box<dyn CutObserver>> {
        self.observer.take()
    }

    /// Configuration.
    pub fn config(&self) -> &GomoryConfig {
        &self.config
    }

    /// Statistics.
    pub fn stats(&self) -> &GomoryStats {
        &self.stats
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.stats = GomoryStats::default();
    }

    /// Check that `pivot` can be cut on and return its row.
    ///
    /// The pivot must be an integer basic column with a fractional value and
    /// every other column of its row must sit at a bound with no
    /// infinitesimal part.
    pub fn check_target<P: ColumnProvider + ?Sized>(provider: &P, pivot: ColumnId) -> CutResult<&Row> {
        let row = provider.row_of(pivot).ok_or(CutError::NotBasic(pivot))?;
        if !provider.is_int(pivot) {
            return Err(CutError::NotInteger(pivot));
        }
        if provider.value(pivot).x.is_integer() {
            return Err(CutError::IntegralValue(pivot));
        }
        for entry in row {
            let col = entry.col;
            if col == pivot {
                continue;
            }
            if !provider.at_lower(col) && !provider.at_upper(col) {
                return Err(CutError::NotAtBound { pivot, col });
            }
            if !provider.value(col).is_rational() {
                return Err(CutError::Infinitesimal { pivot, col });
            }
        }
        Ok(row)
    }

    /// Validate `pivot`, fetch its row and derive a cut.
    pub fn get_cut<P: ColumnProvider + ?Sized>(
        &mut self,
        provider: &P,
        pivot: ColumnId,
    ) -> CutResult<CutOutcome> {
        match Self::check_target(provider, pivot) {
            Ok(row) => Ok(self.cut(provider, pivot, row)),
            Err(e) => {
                self.stats.rejected_targets += 1;
                debug!(pivot, error = %e, "gomory target rejected");
                Err(e)
            }
        }
    }

    /// Derive a cut from `row`, the row of the basic column `pivot`.
    ///
    /// The pivot's value must have a fractional part in `(0, 1)` and it must
    /// appear in the row with coefficient one.
    pub fn cut<P: ColumnProvider + ?Sized>(
        &mut self,
        provider: &P,
        pivot: ColumnId,
        row: &Row,
    ) -> CutOutcome {
        let value = provider.value(pivot);
        let Some(pf) = PivotFraction::new(&value.x) else {
            debug_assert!(false, "gomory pivot {pivot} has integral value {value}");
            warn!(pivot, %value, "gomory pivot has integral value");
            return self.undef(pivot);
        };
        trace!(pivot, f = %pf.f, "gomory cut");

        let guard = if self.config.small_cuts {
            OverflowGuard::for_row(row, &pf)
        } else {
            OverflowGuard::disabled()
        };
        let mut builder = CutBuilder::new(provider, pf, guard);

        for entry in row {
            if entry.col == pivot {
                debug_assert!(entry.coeff.is_one());
                continue;
            }
            if let Err(abort) = builder.add_entry(entry) {
                builder.discard();
                match abort {
                    Abort::Overflow(overflow) => {
                        self.stats.overflow_aborts += 1;
                        debug!(pivot, col = entry.col, %overflow, "gomory cut abandoned");
                    }
                    Abort::OffBound(col) => {
                        debug_assert!(false, "column {col} is not at a bound");
                        warn!(pivot, col, "gomory row column not at a bound");
                    }
                }
                return self.undef(pivot);
            }
        }

        let CutBuilder {
            mut term,
            mut k,
            mut explanation,
            has_int_columns,
            ..
        } = builder;

        if term.is_empty() {
            debug_assert!(k.is_positive());
            self.stats.conflicts += 1;
            debug!(pivot, size = explanation.len(), "gomory conflict");
            if let Some(observer) = self.observer.as_mut() {
                observer.on_conflict(pivot, &explanation);
            }
            return CutOutcome::Conflict { explanation, k };
        }

        // real-only cuts keep their coefficients unless k needs scaling
        if has_int_columns || !k.is_integer() {
            simplify_inequality(provider, &mut term, &mut k, &mut explanation);
            self.stats.simplified += 1;
            if term.is_empty() {
                debug_assert!(false, "simplified gomory cut has no columns");
                warn!(pivot, k = %k, "simplified gomory cut has no columns");
                return self.undef(pivot);
            }
        }

        let cut = Cut {
            term,
            k,
            explanation,
        };
        debug_assert!(cut.is_violated_by(provider), "cut {cut} does not separate");
        self.stats.cuts += 1;
        debug!(pivot, size = cut.term.len(), k = %cut.k, "gomory cut");
        if let Some(observer) = self.observer.as_mut() {
            observer.on_cut(pivot, row, &cut);
        }
        CutOutcome::Cut(cut)
    }

    fn undef(&mut self, pivot: ColumnId) -> CutOutcome {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_undef(pivot);
        }
        CutOutcome::Undef
    }
}
