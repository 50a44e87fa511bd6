//! OxiZ Cuts - Gomory cut generation for linear integer arithmetic
//!
//! This crate derives Gomory / mixed-integer-rounding cuts for the integer
//! arithmetic solver. Given an integer basic column with a fractional value,
//! it produces an inequality that every integer-feasible point satisfies but
//! the current simplex assignment violates, together with the bound facts the
//! inequality depends on:
//! - [`GomoryCutGenerator`] drives the derivation over a tableau row
//! - [`rules`] holds the per-column rounding coefficients
//! - [`OverflowGuard`] abandons derivations with runaway coefficients
//! - [`simplify_inequality`] tightens the result to integer coefficients
//!
//! The solver is accessed through the read-only [`ColumnProvider`] trait;
//! [`Tableau`] is an in-memory implementation.
//!
//! # Examples
//!
//! ```
//! use oxiz_cuts::numeric::{int, rat};
//! use oxiz_cuts::{CutOutcome, GomoryCutGenerator, Tableau};
//!
//! let mut t = Tableau::new();
//! let p = t.add_int_column();
//! let x = t.add_int_column();
//! t.set_lower(x, int(1), 0);
//! t.set_value(x, int(1));
//!
//! // p - x/3 = 0, so p = 1/3 at the current assignment
//! t.add_row(p, [(int(1), p), (rat(-1, 3), x)].into_iter().collect());
//! t.derive_basic_value(p);
//!
//! let mut generator = GomoryCutGenerator::default();
//! match generator.get_cut(&t, p).unwrap() {
//!     CutOutcome::Cut(cut) => {
//!         // x >= 3
//!         assert_eq!(cut.k, int(3));
//!         assert!(cut.is_violated_by(&t));
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod dependency;
pub mod error;
pub mod explanation;
pub mod gomory;
pub mod guard;
pub mod numeric;
pub mod provider;
pub mod rules;
pub mod simplify;
pub mod tableau;
pub mod term;

pub use dependency::{DepId, DependencyArena, FactId, FactList};
pub use error::{CutError, CutResult};
pub use explanation::Explanation;
pub use gomory::{Cut, CutObserver, CutOutcome, GomoryConfig, GomoryCutGenerator, GomoryStats};
pub use guard::{CoefficientOverflow, OverflowGuard};
pub use numeric::InfRational;
pub use provider::{Bound, BoundSide, ColumnProvider};
pub use rules::PivotFraction;
pub use simplify::simplify_inequality;
pub use tableau::{ColumnInfo, Tableau};
pub use term::{ColumnId, Row, RowEntry, Term};
