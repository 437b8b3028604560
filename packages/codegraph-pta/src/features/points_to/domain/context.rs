//! Calling and heap contexts
//!
//! A context is an ordered, bounded sequence of context elements. Which
//! element kind is used (call sites, receiver objects or receiver types)
//! is decided by the active [`ContextSelector`](crate::features::points_to::ports::ContextSelector);
//! the context itself only knows how to grow and k-limit.

use super::heap::ObjId;
use crate::shared::models::{ClassId, StmtId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContextElement {
    /// Call-site sensitivity (k-CFA)
    CallSite(StmtId),
    /// Object sensitivity: receiver allocation site
    Obj(ObjId),
    /// Type sensitivity: class containing the receiver's allocation site
    Type(ClassId),
}

/// Call context (oldest element first)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Context {
    elements: Vec<ContextElement>,
}

impl Context {
    /// The distinguished empty context
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_elements(elements: Vec<ContextElement>) -> Self {
        Self { elements }
    }

    #[inline]
    pub fn elements(&self) -> &[ContextElement] {
        &self.elements
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Push a new element (with k-limiting)
    ///
    /// Keeps only the `k` most recent elements, dropping the oldest.
    pub fn append(&self, element: ContextElement, k: usize) -> Self {
        if k == 0 {
            return Self::empty();
        }
        let keep = self.elements.len().min(k - 1);
        let mut elements = Vec::with_capacity(keep + 1);
        elements.extend_from_slice(&self.elements[self.elements.len() - keep..]);
        elements.push(element);
        Self { elements }
    }

    /// Keep the `k` most recent elements
    pub fn truncate(&self, k: usize) -> Self {
        let keep = self.elements.len().min(k);
        Self {
            elements: self.elements[self.elements.len() - keep..].to_vec(),
        }
    }
}

impl fmt::Display for ContextElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextElement::CallSite(s) => write!(f, "cs#{}", s.0),
            ContextElement::Obj(o) => write!(f, "obj#{}", o.0),
            ContextElement::Type(c) => write!(f, "type#{}", c.0),
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, "]")
    }
}
