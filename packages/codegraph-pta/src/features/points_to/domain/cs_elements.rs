//! Context-sensitive program elements
//!
//! Structural keys pairing a context with a program entity, plus the
//! dense handles the managers hand out for them. Every solver table is
//! keyed by these handles rather than by the structural values.

use super::heap::ObjId;
use crate::define_id;
use crate::shared::models::{FieldId, MethodId, StmtId, VarId};
use serde::{Deserialize, Serialize};

define_id!(
    /// Interned [`Context`](super::Context)
    ContextId
);
define_id!(
    /// Interned [`CsObj`]
    CsObjId
);
define_id!(
    /// Interned [`CsMethod`]
    CsMethodId
);
define_id!(
    /// Interned [`CsCallSite`]
    CsCallSiteId
);
define_id!(
    /// Interned [`Pointer`]
    PointerId
);

/// Abstract object under a heap context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CsObj {
    pub context: ContextId,
    pub obj: ObjId,
}

/// Method under a calling context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CsMethod {
    pub context: ContextId,
    pub method: MethodId,
}

/// Call site under the context of its containing method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CsCallSite {
    pub context: ContextId,
    pub call_site: StmtId,
}

/// Anything that can hold a points-to set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pointer {
    /// Local variable under a context
    Var { context: ContextId, var: VarId },
    /// `o.f` for a context-sensitive object
    InstanceField { base: CsObjId, field: FieldId },
    /// `T.f`
    StaticField(FieldId),
    /// All elements of an array object
    ArrayIndex(CsObjId),
}

impl Pointer {
    pub fn kind_str(&self) -> &'static str {
        match self {
            Pointer::Var { .. } => "var",
            Pointer::InstanceField { .. } => "instance-field",
            Pointer::StaticField(_) => "static-field",
            Pointer::ArrayIndex(_) => "array-index",
        }
    }

    #[inline]
    pub fn as_var(&self) -> Option<(ContextId, VarId)> {
        match *self {
            Pointer::Var { context, var } => Some((context, var)),
            _ => None,
        }
    }
}
