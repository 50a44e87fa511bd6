//! Exact numeric helpers for cut derivation.
//!
//! Values in the simplex tableau are rationals extended with an infinitesimal
//! component so that strict bounds (`x > c`, `x < c`) can be represented
//! exactly: `c + δ` and `c - δ` for an arbitrarily small positive `δ`.
//!
//! ## References
//!
//! - Dutertre & de Moura: "A Fast Linear-Arithmetic Solver for DPLL(T)" (2006)

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A rational extended with an infinitesimal: `x + y·δ`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InfRational {
    /// Standard part.
    pub x: BigRational,
    /// Coefficient of the infinitesimal `δ`.
    pub y: BigRational,
}

impl InfRational {
    /// Create `x + y·δ`.
    pub fn new(x: BigRational, y: BigRational) -> Self {
        Self { x, y }
    }

    /// Create a plain rational value (no infinitesimal part).
    pub fn from_rational(x: BigRational) -> Self {
        Self {
            x,
            y: BigRational::zero(),
        }
    }

    /// Create a plain integer value.
    pub fn from_integer(n: i64) -> Self {
        Self::from_rational(BigRational::from_integer(BigInt::from(n)))
    }

    /// The zero value.
    pub fn zero() -> Self {
        Self::from_rational(BigRational::zero())
    }

    /// Value just above `x` (encodes a strict lower bound `> x`).
    pub fn above(x: BigRational) -> Self {
        Self::new(x, BigRational::one())
    }

    /// Value just below `x` (encodes a strict upper bound `< x`).
    pub fn below(x: BigRational) -> Self {
        Self::new(x, -BigRational::one())
    }

    /// True when the infinitesimal part is zero.
    pub fn is_rational(&self) -> bool {
        self.y.is_zero()
    }

    /// True when the value is an integer with no infinitesimal part.
    pub fn is_integral(&self) -> bool {
        self.is_rational() && self.x.is_integer()
    }

    /// Multiply by a rational scalar.
    pub fn scale(&self, c: &BigRational) -> Self {
        Self {
            x: &self.x * c,
            y: &self.y * c,
        }
    }
}

impl PartialOrd for InfRational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InfRational {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x.cmp(&other.x).then_with(|| self.y.cmp(&other.y))
    }
}

impl Add for InfRational {
    type Output = InfRational;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl AddAssign<&InfRational> for InfRational {
    fn add_assign(&mut self, rhs: &InfRational) {
        self.x += &rhs.x;
        self.y += &rhs.y;
    }
}

impl Sub for InfRational {
    type Output = InfRational;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Neg for InfRational {
    type Output = InfRational;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<&BigRational> for &InfRational {
    type Output = InfRational;

    fn mul(self, rhs: &BigRational) -> Self::Output {
        self.scale(rhs)
    }
}

impl From<BigRational> for InfRational {
    fn from(x: BigRational) -> Self {
        Self::from_rational(x)
    }
}

impl fmt::Display for InfRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.y.is_zero() {
            write!(f, "{}", self.x)
        } else if self.y.is_positive() {
            write!(f, "{} + {}δ", self.x, self.y)
        } else {
            write!(f, "{} - {}δ", self.x, -&self.y)
        }
    }
}

/// `q - floor(q)`, always in `[0, 1)`.
pub fn fractional_part(q: &BigRational) -> BigRational {
    q - q.floor()
}

/// True when `q` has denominator one.
pub fn is_integral(q: &BigRational) -> bool {
    q.is_integer()
}

/// `k / d`, rounded up when the quotient is not integral.
///
/// `d` must be positive.
pub fn ceil_div(k: &BigRational, d: &BigRational) -> BigRational {
    debug_assert!(d.is_positive());
    (k / d).ceil()
}

/// Shorthand for the rational `n / d`.
pub fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

/// Shorthand for the integer rational `n`.
pub fn int(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}
