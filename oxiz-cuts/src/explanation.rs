//! Cut explanations.
//!
//! An explanation collects the atomic facts (bound constraints) a derived cut
//! or conflict depends on. The caller turns `(term >= k)` together with its
//! explanation into the lemma `¬(∧ explanation) ∨ (term >= k)`.

use crate::dependency::{DepId, FactId};
use crate::provider::ColumnProvider;
use rustc_hash::FxHashSet;

/// Insertion-ordered set of atomic facts.
#[derive(Debug, Clone, Default)]
pub struct Explanation {
    /// Facts in the order they were first recorded.
    facts: Vec<FactId>,
    /// Membership index.
    seen: FxHashSet<FactId>,
}

impl Explanation {
    /// Create an empty explanation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fact. Returns false if it was already present.
    pub fn push(&mut self, fact: FactId) -> bool {
        if self.seen.insert(fact) {
            self.facts.push(fact);
            true
        } else {
            false
        }
    }

    /// Record every atomic fact behind a justification.
    pub fn push_dep<P: ColumnProvider + ?Sized>(&mut self, provider: &P, dep: DepId) {
        self.extend(provider.flatten(dep));
    }

    /// Check if a fact is recorded.
    pub fn contains(&self, fact: FactId) -> bool {
        self.seen.contains(&fact)
    }

    /// Number of recorded facts.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Check if no facts are recorded.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Forget all facts.
    pub fn clear(&mut self) {
        self.facts.clear();
        self.seen.clear();
    }

    /// Iterate over the facts in recording order.
    pub fn iter(&self) -> impl Iterator<Item = FactId> + '_ {
        self.facts.iter().copied()
    }

    /// Facts as a slice, in recording order.
    pub fn as_slice(&self) -> &[FactId] {
        &self.facts
    }
}

impl Extend<FactId> for Explanation {
    fn extend<I: IntoIterator<Item = FactId>>(&mut self, iter: I) {
        for fact in iter {
            self.push(fact);
        }
    }
}

impl PartialEq for Explanation {
    fn eq(&self, other: &Self) -> bool {
        self.facts == other.facts
    }
}

impl Eq for Explanation {}
