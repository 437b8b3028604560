//! Points-to worklist
//!
//! FIFO queue of pointers plus a pending map holding each queued
//! pointer's accumulated incoming set. Enqueuing a pointer that is already
//! pending merges the new objects into its pending set instead of queuing
//! it twice.

use crate::features::points_to::domain::{PointerId, PointsToSet};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct PtaWorklist {
    queue: VecDeque<PointerId>,
    pending: FxHashMap<PointerId, PointsToSet>,
}

impl PtaWorklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pointer: PointerId, incoming: PointsToSet) {
        if let Some(existing) = self.pending.get_mut(&pointer) {
            existing.union_with(&incoming);
            return;
        }
        self.pending.insert(pointer, incoming);
        self.queue.push_back(pointer);
    }

    pub fn pop(&mut self) -> Option<(PointerId, PointsToSet)> {
        let pointer = self.queue.pop_front()?;
        let incoming = self.pending.remove(&pointer).unwrap_or_default();
        Some((pointer, incoming))
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
