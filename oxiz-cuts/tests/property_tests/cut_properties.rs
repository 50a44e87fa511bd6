//! Property-based tests for Gomory cut derivation
//!
//! This module tests, over random rows whose non-basic columns sit at a bound:
//! - Cuts have an integer right-hand side and cut off the current assignment
//! - Cuts hold at every integer-feasible point of a small grid
//! - Conflicts only arise when no integer-feasible grid point exists
//! - The overflow guard either abandons a derivation or leaves it unchanged

use num_rational::BigRational;
use num_traits::{Signed, Zero};
use oxiz_cuts::numeric::{int, rat};
use oxiz_cuts::{ColumnId, CutOutcome, GomoryConfig, GomoryCutGenerator, Tableau};
use proptest::prelude::*;

/// Shape of one non-basic column of the generated row
#[derive(Debug, Clone)]
struct ColSpec {
    is_int: bool,
    fixed: bool,
    lower: BigRational,
    width: i64,
    at_upper: bool,
    coeff: BigRational,
}

impl ColSpec {
    fn upper(&self) -> BigRational {
        &self.lower + int(self.width)
    }

    fn value(&self) -> BigRational {
        if self.fixed || !self.at_upper {
            self.lower.clone()
        } else {
            self.upper()
        }
    }

    /// Values of the column to try when checking soundness
    fn candidates(&self) -> Vec<BigRational> {
        let value = self.value();
        let sign = if self.at_upper { int(-1) } else { int(1) };
        if self.fixed {
            vec![value]
        } else if self.is_int && self.coeff.is_integer() {
            // contributes an integer whatever its value
            (-3..=3).map(|d| &value + int(d)).collect()
        } else if self.is_int {
            (0..6).map(|t| &value + &sign * int(t)).collect()
        } else {
            [
                int(0),
                rat(1, 6),
                rat(1, 3),
                rat(1, 2),
                rat(2, 3),
                int(1),
                rat(3, 2),
                int(2),
                int(3),
            ]
            .iter()
            .map(|t| &value + &sign * t)
            .collect()
        }
    }
}

/// Strategy for generating one row column
fn col_spec_strategy() -> impl Strategy<Value = ColSpec> {
    (
        any::<bool>(),
        0u8..6,
        -4i64..4,
        1i64..4,
        1i64..4,
        any::<bool>(),
        -6i64..=6,
        1i64..4,
    )
        .prop_filter("nonzero coefficient", |spec| spec.6 != 0)
        .prop_map(
            |(is_int, fixed, lo, lo_den, width, at_upper, num, den)| ColSpec {
                is_int,
                fixed: fixed == 0,
                lower: if is_int { int(lo) } else { rat(lo, lo_den) },
                width,
                at_upper,
                coeff: rat(num, den),
            },
        )
}

/// Random columns followed by an integer column with coefficient `1/7`.
///
/// Every other coefficient and bound has a denominator below seven, so the
/// pivot's value is never integral.
fn row_strategy() -> impl Strategy<Value = Vec<ColSpec>> {
    (prop::collection::vec(col_spec_strategy(), 1..4), any::<bool>()).prop_map(
        |(mut specs, fixed)| {
            specs.push(ColSpec {
                is_int: true,
                fixed,
                lower: int(1),
                width: 3,
                at_upper: false,
                coeff: rat(1, 7),
            });
            specs
        },
    )
}

/// Tableau with pivot column 0 defined by `pivot + Σ coeff·col = 0`.
///
/// Column `i + 1` carries lower fact `2i` and upper fact `2i + 1`.
fn build(specs: &[ColSpec]) -> Tableau {
    let mut t = Tableau::new();
    let pivot = t.add_int_column();
    let mut entries = vec![(int(1), pivot)];
    for (i, spec) in specs.iter().enumerate() {
        let col = t.add_column(spec.is_int);
        if spec.fixed {
            t.fix(col, spec.lower.clone(), 2 * i, 2 * i + 1);
        } else {
            t.set_lower(col, spec.lower.clone(), 2 * i);
            t.set_upper(col, spec.upper(), 2 * i + 1);
            t.set_value(col, spec.value());
        }
        entries.push((spec.coeff.clone(), col));
    }
    t.add_row(pivot, entries.into_iter().collect());
    t.derive_basic_value(pivot);
    t
}

/// Every combination of candidate values, indexed by column id
fn grid(specs: &[ColSpec]) -> Vec<Vec<BigRational>> {
    let mut points = vec![vec![BigRational::zero()]];
    for spec in specs {
        let candidates = spec.candidates();
        points = points
            .into_iter()
            .flat_map(|p| {
                candidates.iter().map(move |c| {
                    let mut q = p.clone();
                    q.push(c.clone());
                    q
                })
            })
            .collect();
    }
    for p in points.iter_mut() {
        let pivot = specs
            .iter()
            .enumerate()
            .fold(BigRational::zero(), |acc, (i, s)| acc - &s.coeff * &p[i + 1]);
        p[0] = pivot;
    }
    points
}

fn pivot_fractional(t: &Tableau) -> bool {
    use oxiz_cuts::ColumnProvider;
    !t.value(0).x.is_integer()
}

fn unguarded() -> GomoryCutGenerator {
    GomoryCutGenerator::new(GomoryConfig { small_cuts: false })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    /// Test that an unguarded derivation on a valid target never gives up
    #[test]
    fn cut_unguarded_never_undef(specs in row_strategy()) {
        let t = build(&specs);
        prop_assert!(pivot_fractional(&t));

        let outcome = unguarded().get_cut(&t, 0).expect("valid target");
        prop_assert!(!outcome.is_undef());
    }

    /// Test that cuts are integral and separate the current assignment
    #[test]
    fn cut_separates_assignment(specs in row_strategy()) {
        let t = build(&specs);
        prop_assert!(pivot_fractional(&t));

        if let CutOutcome::Cut(cut) = unguarded().get_cut(&t, 0).expect("valid target") {
            prop_assert!(cut.k.is_integer());
            prop_assert!(!cut.term.is_empty());
            prop_assert!(cut.is_violated_by(&t));
            for (_, c) in cut.term.iter() {
                prop_assert!(!c.is_zero());
            }
        }
    }

    /// Test that cuts hold at integer-feasible grid points
    #[test]
    fn cut_is_sound(specs in row_strategy()) {
        let t = build(&specs);
        prop_assert!(pivot_fractional(&t));

        match unguarded().get_cut(&t, 0).expect("valid target") {
            CutOutcome::Cut(cut) => {
                for point in grid(&specs).iter().filter(|p| p[0].is_integer()) {
                    let holds = cut.holds_at(|col: ColumnId| point[col].clone());
                    prop_assert!(holds, "cut {} violated at {:?}", cut, point);
                }
            }
            CutOutcome::Conflict { k, explanation } => {
                prop_assert!(k.is_positive());
                prop_assert!(grid(&specs).iter().all(|p| !p[0].is_integer()));
                prop_assert!(!explanation.is_empty());
            }
            CutOutcome::Undef => prop_assert!(false, "unguarded derivation gave up"),
        }
    }

    /// Test that the guard only ever turns an outcome into Undef
    #[test]
    fn guard_abandons_or_agrees(specs in row_strategy()) {
        let t = build(&specs);
        prop_assert!(pivot_fractional(&t));

        let plain = unguarded().get_cut(&t, 0).expect("valid target");
        let mut guarded = GomoryCutGenerator::default();
        let outcome = guarded.get_cut(&t, 0).expect("valid target");
        if outcome.is_undef() {
            prop_assert_eq!(guarded.stats().overflow_aborts, 1);
        } else {
            prop_assert_eq!(outcome, plain);
        }
    }

    /// Test that explanations only cite facts of the row's bounds
    #[test]
    fn explanation_cites_row_facts(specs in row_strategy()) {
        let t = build(&specs);
        prop_assert!(pivot_fractional(&t));

        let explanation = match unguarded().get_cut(&t, 0).expect("valid target") {
            CutOutcome::Cut(cut) => cut.explanation,
            CutOutcome::Conflict { explanation, .. } => explanation,
            CutOutcome::Undef => return Ok(()),
        };
        for fact in explanation.iter() {
            prop_assert!(fact < 2 * specs.len());
        }
        for (i, spec) in specs.iter().enumerate() {
            if spec.fixed {
                prop_assert!(explanation.contains(2 * i));
                prop_assert!(explanation.contains(2 * i + 1));
            }
        }
    }
}
