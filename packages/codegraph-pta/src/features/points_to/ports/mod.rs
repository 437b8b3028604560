//! Ports (Interfaces) for Points-to Analysis
//!
//! The solver is polymorphic over one capability: choosing contexts for
//! callees and allocated objects. Implementations live in
//! `infrastructure::context_selector`.

use crate::features::points_to::domain::{Context, Obj, ObjId};
use crate::shared::models::{MethodId, StmtId};

/// Receiver object of an instance call, as seen by a selector
#[derive(Debug, Clone, Copy)]
pub struct ReceiverObj<'a> {
    pub id: ObjId,
    pub obj: &'a Obj,
    /// Heap context the receiver was allocated under
    pub heap_context: &'a Context,
}

/// Context policy
///
/// Every implementation applies its bound `k`: contexts that would grow
/// beyond it lose their oldest element.
pub trait ContextSelector: Send + Sync {
    /// Short policy name for logs, e.g. `1-object`
    fn name(&self) -> String;

    fn empty_context(&self) -> Context {
        Context::empty()
    }

    /// Callee context for a static call
    fn select_context(&self, caller: &Context, call_site: StmtId, callee: MethodId) -> Context;

    /// Callee context for an instance call on a known receiver object
    fn select_instance_context(
        &self,
        caller: &Context,
        call_site: StmtId,
        receiver: ReceiverObj<'_>,
        callee: MethodId,
    ) -> Context;

    /// Heap context for an object allocated in `method` under `method_context`
    fn select_heap_context(&self, method_context: &Context, method: MethodId, obj: ObjId)
        -> Context;
}
