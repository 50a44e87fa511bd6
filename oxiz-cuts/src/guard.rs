//! Coefficient growth guard.
//!
//! Cut coefficients are quotients of row coefficients by `f` or `1 - f` and
//! can grow large. A derivation whose coefficients outgrow the row by more
//! than a square is abandoned rather than handed to the solver.

use crate::rules::PivotFraction;
use crate::term::Row;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use std::fmt;

/// A cut coefficient exceeded the guard threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoefficientOverflow {
    /// Magnitude of the offending numerator.
    pub numerator: BigInt,
    /// Threshold in effect.
    pub threshold: BigInt,
}

impl fmt::Display for CoefficientOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cut coefficient numerator {} exceeds {}",
            self.numerator, self.threshold
        )
    }
}

/// Threshold on the numerators of derived cut coefficients.
#[derive(Debug, Clone)]
pub struct OverflowGuard {
    threshold: Option<BigInt>,
}

impl OverflowGuard {
    /// Guard for cuts derived from `row` with pivot fraction `pf`.
    ///
    /// The threshold is `abs_max² · den(f)` where `abs_max` is the largest
    /// `ceil(|c|)` over the row's coefficients. Every rule divides by `f` or
    /// `1 - f`, so `den(f)` keeps the pivot's own precision from counting as
    /// growth: a unit row with `f = 2/5` legitimately yields `5/2`.
    pub fn for_row(row: &Row, pf: &PivotFraction) -> Self {
        let abs_max = row
            .iter()
            .map(|e| e.coeff.abs().ceil().to_integer())
            .max()
            .unwrap_or_else(BigInt::zero);
        let threshold = &abs_max * &abs_max * pf.f.denom();
        Self {
            threshold: Some(threshold),
        }
    }

    /// Guard that never fires.
    pub fn disabled() -> Self {
        Self { threshold: None }
    }

    /// Current threshold, if enabled.
    pub fn threshold(&self) -> Option<&BigInt> {
        self.threshold.as_ref()
    }

    /// Check a freshly derived coefficient.
    pub fn check(&self, coeff: &BigRational) -> Result<(), CoefficientOverflow> {
        let Some(threshold) = &self.threshold else {
            return Ok(());
        };
        let numerator = coeff.numer().abs();
        if numerator > *threshold {
            return Err(CoefficientOverflow {
                numerator,
                threshold: threshold.clone(),
            });
        }
        Ok(())
    }
}
