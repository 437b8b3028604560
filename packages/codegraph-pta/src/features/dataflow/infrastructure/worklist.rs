//! Node worklist: FIFO queue plus pending set
//!
//! A node already waiting in the queue is not queued again.

use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::hash::Hash;

#[derive(Debug)]
pub struct NodeWorklist<N> {
    queue: VecDeque<N>,
    pending: FxHashSet<N>,
}

impl<N> Default for NodeWorklist<N> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            pending: FxHashSet::default(),
        }
    }
}

impl<N: Copy + Eq + Hash> NodeWorklist<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if `node` was already pending
    pub fn push(&mut self, node: N) -> bool {
        if !self.pending.insert(node) {
            return false;
        }
        self.queue.push_back(node);
        true
    }

    pub fn pop(&mut self) -> Option<N> {
        let node = self.queue.pop_front()?;
        self.pending.remove(&node);
        Some(node)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<N: Copy + Eq + Hash> Extend<N> for NodeWorklist<N> {
    fn extend<T: IntoIterator<Item = N>>(&mut self, iter: T) {
        for node in iter {
            self.push(node);
        }
    }
}
