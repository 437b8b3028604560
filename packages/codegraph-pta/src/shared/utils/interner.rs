//! Interning tables
//!
//! Canonical identity for structural keys: interning the same key twice
//! yields the same handle for the lifetime of the table. Handles are
//! dense `u32` newtypes, so side tables can be plain `Vec`s.

use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Dense index handle
pub trait Idx: Copy + Eq + Hash + Debug {
    fn from_usize(index: usize) -> Self;
    fn index(self) -> usize;
}

/// Declare a `u32` newtype handle implementing [`Idx`]
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(pub u32);

        impl $crate::shared::utils::interner::Idx for $name {
            #[inline]
            fn from_usize(index: usize) -> Self {
                debug_assert!(index <= u32::MAX as usize);
                $name(index as u32)
            }

            #[inline]
            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

/// Key → handle table with reverse lookup
#[derive(Debug, Clone)]
pub struct Interner<K, I> {
    map: FxHashMap<K, I>,
    keys: Vec<K>,
}

impl<K, I> Default for Interner<K, I> {
    fn default() -> Self {
        Self {
            map: FxHashMap::default(),
            keys: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, I: Idx> Interner<K, I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get-or-create the handle for `key`
    pub fn intern(&mut self, key: K) -> I {
        if let Some(&id) = self.map.get(&key) {
            return id;
        }
        let id = I::from_usize(self.keys.len());
        self.keys.push(key.clone());
        self.map.insert(key, id);
        id
    }

    /// Handle for `key` if it was interned before
    #[inline]
    pub fn get(&self, key: &K) -> Option<I> {
        self.map.get(key).copied()
    }

    /// Structural key of a handle issued by this table
    #[inline]
    pub fn lookup(&self, id: I) -> &K {
        &self.keys[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate `(handle, key)` in creation order
    pub fn iter(&self) -> impl Iterator<Item = (I, &K)> + '_ {
        self.keys
            .iter()
            .enumerate()
            .map(|(i, key)| (I::from_usize(i), key))
    }
}
