//! Bound justifications.
//!
//! Every bound in the tableau carries a [`DepId`] naming the facts that
//! justify it. A justification is either an atomic fact (an asserted
//! constraint) or the join of two other justifications, as produced by bound
//! propagation. Cut derivation treats these handles as opaque and only ever
//! flattens them into the atomic facts they stand for.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Identifier of an atomic fact (an asserted bound constraint).
pub type FactId = usize;

/// Opaque handle to a bound justification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DepId(pub u32);

/// Flattened list of atomic facts.
pub type FactList = SmallVec<[FactId; 4]>;

#[derive(Debug, Clone, Copy)]
enum DepNode {
    Leaf(FactId),
    Join(DepId, DepId),
}

/// Arena of justification nodes.
#[derive(Debug, Clone, Default)]
pub struct DependencyArena {
    nodes: Vec<DepNode>,
}

impl DependencyArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Justification consisting of a single atomic fact.
    pub fn mk_leaf(&mut self, fact: FactId) -> DepId {
        self.push(DepNode::Leaf(fact))
    }

    /// Justification combining two existing justifications.
    pub fn mk_join(&mut self, a: DepId, b: DepId) -> DepId {
        self.push(DepNode::Join(a, b))
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Atomic facts reachable from `dep`, in first-visit order, each once.
    ///
    /// Unknown handles flatten to nothing.
    pub fn flatten(&self, dep: DepId) -> FactList {
        let mut out = FactList::new();
        let mut visited: FxHashSet<DepId> = FxHashSet::default();
        let mut seen_facts: FxHashSet<FactId> = FxHashSet::default();
        let mut stack = vec![dep];

        while let Some(d) = stack.pop() {
            if !visited.insert(d) {
                continue;
            }
            match self.nodes.get(d.0 as usize) {
                Some(DepNode::Leaf(fact)) => {
                    if seen_facts.insert(*fact) {
                        out.push(*fact);
                    }
                }
                Some(DepNode::Join(a, b)) => {
                    // left child is visited first
                    stack.push(*b);
                    stack.push(*a);
                }
                None => {}
            }
        }

        out
    }

    fn push(&mut self, node: DepNode) -> DepId {
        let id = DepId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }
}
