//! Mixed-integer rounding coefficients.
//!
//! A non-basic column `x` at bound `b` is written as `x = b + t` (lower) or
//! `x = b - t` (upper) with `t >= 0`. The pivot's row then reads
//! `p = p0 + Σ α·t` where `p0` has fractional part `f`. Integrality of `p`
//! yields the disjunctive cut `Σ γ·t >= 1`, whose coefficients `γ` are scaled
//! against `f` or `1 - f` depending on the sign of `α` (real columns) or the
//! fractional part of `α` (integer columns). Re-expressed over `x`, the
//! coefficient of `x` is `+γ` at a lower bound and `-γ` at an upper bound.
//!
//! ## References
//!
//! - Gomory: "An algorithm for integer solutions to linear programs" (1960)
//! - Dutertre & de Moura: "Integrating Simplex with DPLL(T)" (2006)
//! - Marchand & Wolsey: "Aggregation and Mixed Integer Rounding" (2001)

use crate::numeric::fractional_part;
use crate::provider::BoundSide;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Fractional part `f` of the pivot's value and its complement `1 - f`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotFraction {
    /// `f`, in `(0, 1)`.
    pub f: BigRational,
    /// `1 - f`, in `(0, 1)`.
    pub one_minus_f: BigRational,
}

impl PivotFraction {
    /// Fractional split of `value`, or `None` if `value` is integral.
    pub fn new(value: &BigRational) -> Option<Self> {
        let f = fractional_part(value);
        if f.is_zero() {
            return None;
        }
        let one_minus_f = BigRational::one() - &f;
        Some(Self { f, one_minus_f })
    }
}

/// Cut coefficient of a real-valued column.
///
/// `a` is the negated row coefficient of the column.
pub fn real_coefficient(a: &BigRational, side: BoundSide, pf: &PivotFraction) -> BigRational {
    match side {
        BoundSide::Lower => {
            if a.is_positive() {
                a / &pf.one_minus_f
            } else {
                -a / &pf.f
            }
        }
        BoundSide::Upper => {
            if a.is_positive() {
                -a / &pf.f
            } else {
                a / &pf.one_minus_f
            }
        }
    }
}

/// Cut coefficient of an integer column with non-integral row coefficient.
///
/// `fj` is the fractional part of the negated row coefficient, in `(0, 1)`.
/// The result is positive at a lower bound and negative at an upper bound.
pub fn int_coefficient(fj: &BigRational, side: BoundSide, pf: &PivotFraction) -> BigRational {
    debug_assert!(fj.is_positive() && *fj < BigRational::one());
    let one_minus_fj = BigRational::one() - fj;
    match side {
        BoundSide::Lower => {
            let a = if *fj <= pf.one_minus_f {
                fj / &pf.one_minus_f
            } else {
                one_minus_fj / &pf.f
            };
            debug_assert!(a.is_positive());
            a
        }
        BoundSide::Upper => {
            let a = if *fj <= pf.f {
                fj / &pf.f
            } else {
                one_minus_fj / &pf.one_minus_f
            };
            debug_assert!(a.is_positive());
            -a
        }
    }
}
