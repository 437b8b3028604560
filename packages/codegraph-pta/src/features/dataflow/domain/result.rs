//! Fixpoint result tables

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// IN and OUT facts per node
///
/// Nodes the solver never reached read as the bottom fact.
#[derive(Debug, Clone)]
pub struct DataflowResult<N, F> {
    in_facts: FxHashMap<N, F>,
    out_facts: FxHashMap<N, F>,
    bottom: F,
}

impl<N: Copy + Eq + Hash, F> DataflowResult<N, F> {
    pub fn new(bottom: F) -> Self {
        Self {
            in_facts: FxHashMap::default(),
            out_facts: FxHashMap::default(),
            bottom,
        }
    }

    pub fn in_fact(&self, node: N) -> &F {
        self.in_facts.get(&node).unwrap_or(&self.bottom)
    }

    pub fn out_fact(&self, node: N) -> &F {
        self.out_facts.get(&node).unwrap_or(&self.bottom)
    }

    pub fn set_in_fact(&mut self, node: N, fact: F) {
        self.in_facts.insert(node, fact);
    }

    pub fn set_out_fact(&mut self, node: N, fact: F) {
        self.out_facts.insert(node, fact);
    }

    /// Nodes with a recorded OUT fact
    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.out_facts.keys().copied()
    }
}
