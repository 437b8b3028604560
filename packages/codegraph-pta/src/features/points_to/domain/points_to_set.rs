//! Growth-only points-to sets
//!
//! Elements are context-sensitive objects. Iteration follows insertion
//! order, which keeps solver runs deterministic.

use super::cs_elements::CsObjId;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Default)]
pub struct PointsToSet {
    objects: Vec<CsObjId>,
    members: FxHashSet<CsObjId>,
}

impl PointsToSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(obj: CsObjId) -> Self {
        let mut set = Self::new();
        set.add_object(obj);
        set
    }

    /// Returns `true` if `obj` was not present before
    pub fn add_object(&mut self, obj: CsObjId) -> bool {
        if self.members.insert(obj) {
            self.objects.push(obj);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn contains(&self, obj: CsObjId) -> bool {
        self.members.contains(&obj)
    }

    /// Objects in insertion order
    pub fn objects(&self) -> impl Iterator<Item = CsObjId> + '_ {
        self.objects.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Elements of `other` not yet in `self`; neither set is modified
    pub fn difference(&self, other: &PointsToSet) -> PointsToSet {
        let mut delta = PointsToSet::new();
        for obj in other.objects() {
            if !self.contains(obj) {
                delta.add_object(obj);
            }
        }
        delta
    }

    /// Add every element of `other`; returns `true` if `self` grew
    pub fn union_with(&mut self, other: &PointsToSet) -> bool {
        let before = self.len();
        for obj in other.objects() {
            self.add_object(obj);
        }
        self.len() > before
    }
}

impl PartialEq for PointsToSet {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for PointsToSet {}

impl FromIterator<CsObjId> for PointsToSet {
    fn from_iter<T: IntoIterator<Item = CsObjId>>(iter: T) -> Self {
        let mut set = PointsToSet::new();
        for obj in iter {
            set.add_object(obj);
        }
        set
    }
}
