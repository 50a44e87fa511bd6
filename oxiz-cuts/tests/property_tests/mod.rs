//! Property-based tests for oxiz-cuts
//!
//! This module checks, over randomly generated rows and bounds:
//! - Soundness of derived cuts on small integer/rational grids
//! - Separation of the current assignment and integrality of `k`
//! - Equivalence and idempotence of inequality simplification

mod cut_properties;
mod simplify_properties;
