//! Property-based tests for inequality simplification
//!
//! Columns 0 and 1 are integer-typed, columns 2 and 3 are real.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Zero};
use oxiz_cuts::numeric::{int, rat};
use oxiz_cuts::{simplify_inequality, ColumnId, Explanation, Tableau, Term};
use proptest::prelude::*;

const REAL_VALUES: [(i64, i64); 7] = [(-1, 1), (-1, 2), (0, 1), (1, 3), (1, 2), (1, 1), (3, 2)];

/// Strategy for generating a nonzero rational coefficient
fn coeff_strategy() -> impl Strategy<Value = BigRational> {
    (-6i64..=6, 1i64..4)
        .prop_filter("nonzero", |(n, _)| *n != 0)
        .prop_map(|(n, d)| rat(n, d))
}

fn rhs_strategy() -> impl Strategy<Value = BigRational> {
    (-12i64..=12, 1i64..5).prop_map(|(n, d)| rat(n, d))
}

fn term_strategy() -> impl Strategy<Value = Vec<(BigRational, ColumnId)>> {
    prop::collection::vec(prop::option::of(coeff_strategy()), 4).prop_map(|coeffs| {
        coeffs
            .into_iter()
            .enumerate()
            .filter_map(|(col, c)| c.map(|c| (c, col)))
            .collect()
    })
}

fn tableau() -> Tableau {
    let mut t = Tableau::new();
    t.add_int_column();
    t.add_int_column();
    t.add_real_column();
    t.add_real_column();
    t
}

fn simplify(t: &Tableau, pairs: &[(BigRational, ColumnId)], k: &BigRational) -> (Term, BigRational) {
    let mut term: Term = pairs.iter().cloned().collect();
    let mut k = k.clone();
    let mut explanation = Explanation::new();
    simplify_inequality(t, &mut term, &mut k, &mut explanation);
    (term, k)
}

fn holds(term: &Term, k: &BigRational, point: &[BigRational]) -> bool {
    let lhs = term
        .iter()
        .fold(BigRational::zero(), |acc, (col, c)| acc + c * &point[col]);
    &lhs >= k
}

/// Integer columns over -3..=3, real columns over a few rationals
fn grid() -> Vec<Vec<BigRational>> {
    let mut points = Vec::new();
    for x in -3..=3 {
        for y in -3..=3 {
            for (rn, rd) in REAL_VALUES {
                for (sn, sd) in REAL_VALUES {
                    points.push(vec![int(x), int(y), rat(rn, rd), rat(sn, sd)]);
                }
            }
        }
    }
    points
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Test that simplification preserves the integer solutions
    #[test]
    fn simplify_preserves_solutions(pairs in term_strategy(), k in rhs_strategy()) {
        prop_assume!(!pairs.is_empty());
        let t = tableau();
        let original: Term = pairs.iter().cloned().collect();
        let (term, k2) = simplify(&t, &pairs, &k);

        prop_assert!(k2.is_integer());
        for point in grid() {
            prop_assert_eq!(
                holds(&original, &k, &point),
                holds(&term, &k2, &point),
                "{:?} >= {} vs {:?} >= {} at {:?}",
                pairs, k, term.to_pairs(), k2, point
            );
        }
    }

    /// Test that simplification is idempotent
    #[test]
    fn simplify_idempotent(pairs in term_strategy(), k in rhs_strategy()) {
        prop_assume!(!pairs.is_empty());
        let t = tableau();
        let (term, k) = simplify(&t, &pairs, &k);
        let (again, k_again) = simplify(&t, &term.to_pairs(), &k);

        prop_assert_eq!(again, term);
        prop_assert_eq!(k_again, k);
    }

    /// Test that the result has coprime integer coefficients
    #[test]
    fn simplify_coefficients_coprime(pairs in term_strategy(), k in rhs_strategy()) {
        prop_assume!(!pairs.is_empty());
        let t = tableau();
        let (term, k) = simplify(&t, &pairs, &k);

        let mut g = BigInt::zero();
        for (_, c) in term.iter() {
            prop_assert!(c.is_integer());
            g = g.gcd(c.numer());
        }
        // a real column makes k part of the common divisor
        let mixed = term.iter().any(|(col, _)| col >= 2);
        if mixed {
            prop_assert!(g.gcd(k.numer()).is_one());
        } else {
            prop_assert!(g.is_one());
        }
    }
}
