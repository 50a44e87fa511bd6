//! Tightening of derived inequalities `term >= k`.
//!
//! Gomory cuts over integer columns come out with rational coefficients. The
//! simplifier expands alias columns, replaces fixed columns by their values,
//! scales to integer coefficients and divides by the coefficient gcd, rounding
//! `k` up where integrality of the left-hand side allows it.
//!
//! For `a·x + b·y >= k` with `y` fixed at `c`, `a·x >= k - b·c` holds under
//! the bounds of `y`, which are then added to the explanation.

use crate::explanation::Explanation;
use crate::numeric::ceil_div;
use crate::provider::ColumnProvider;
use crate::term::{ColumnId, Term};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use tracing::trace;

/// Rewrite `term >= k` into an equivalent inequality with integer
/// coefficients and integer `k`, as tight as integrality permits.
///
/// Bounds of fixed columns consumed along the way are appended to
/// `explanation`. The term may end up empty only if every column of the
/// unfolded term is fixed.
pub fn simplify_inequality<P: ColumnProvider + ?Sized>(
    provider: &P,
    term: &mut Term,
    k: &mut BigRational,
    explanation: &mut Explanation,
) {
    debug_assert!(!term.is_empty());
    let mut pol = provider.unfold(term).to_pairs();
    term.clear();

    if pol.len() == 1 && provider.is_integral_column(pol[0].1) {
        let (a, v) = pol.remove(0);
        trace!(col = v, coeff = %a, k = %k, "single monomial cut");
        if !provider.is_int(v) {
            // integrality of v comes from its bounds
            push_fixed_bounds(provider, v, explanation);
        }
        if a.is_positive() {
            // a·v >= k  =>  v >= ceil(k / a)
            *k = ceil_div(k, &a);
            term.add_monomial(BigRational::one(), v);
        } else {
            // a·v >= k  =>  -v >= ceil(k / -a)
            *k = ceil_div(k, &-a);
            term.add_monomial(-BigRational::one(), v);
        }
        debug_assert!(k.is_integer());
        return;
    }

    let mut kept: Vec<(BigRational, ColumnId)> = Vec::with_capacity(pol.len());
    for (c, v) in pol {
        let fixed_value = if provider.is_fixed(v) {
            provider.lower_bound(v).map(|b| b.value.x.clone())
        } else {
            None
        };
        match fixed_value {
            Some(value) => {
                push_fixed_bounds(provider, v, explanation);
                *k -= &c * value;
            }
            None => kept.push((c, v)),
        }
    }

    let lcm_den = kept
        .iter()
        .fold(k.denom().clone(), |acc, (c, _)| acc.lcm(c.denom()));
    if !lcm_den.is_one() {
        let scale = BigRational::from_integer(lcm_den);
        for (c, _) in kept.iter_mut() {
            *c *= &scale;
        }
        *k *= &scale;
    }

    let int_row = kept.iter().all(|(_, v)| provider.is_integral_column(*v));
    let mut g = kept
        .iter()
        .fold(BigInt::zero(), |acc, (c, _)| acc.gcd(c.numer()));
    if !int_row {
        g = g.gcd(k.numer());
    }
    if !g.is_zero() && !g.is_one() {
        let g = BigRational::from_integer(g);
        for (c, _) in kept.iter_mut() {
            *c /= &g;
        }
        *k = ceil_div(k, &g);
    }

    for (c, v) in kept {
        term.add_monomial(c, v);
    }
    trace!(size = term.len(), k = %k, "simplified cut");
    debug_assert!(k.is_integer());
}

fn push_fixed_bounds<P: ColumnProvider + ?Sized>(
    provider: &P,
    col: ColumnId,
    explanation: &mut Explanation,
) {
    if let Some(b) = provider.lower_bound(col) {
        explanation.push_dep(provider, b.dep);
    }
    if let Some(b) = provider.upper_bound(col) {
        explanation.push_dep(provider, b.dep);
    }
}
