//! Context selectors
//!
//! Multiple context abstractions behind one [`ContextSelector`] port:
//! - **Insensitive**: every method and object lives in the empty context
//! - **Call-string (k-CFA)**: k most recent call sites
//! - **Object sensitivity**: k most recent receiver allocation sites
//! - **Type sensitivity**: k most recent classes containing receiver allocation sites
//!
//! All k-limited selectors use the last `k - 1` elements of the
//! allocating method's context as heap context.
//!
//! # References
//! - Shivers "Control-Flow Analysis of Higher-Order Languages" (PhD 1991)
//! - Milanova et al. "Parameterized Object Sensitivity" (TOSEM 2005)
//! - Smaragdakis et al. "Pick Your Contexts Well" (POPL 2011)

use crate::config::ContextSensitivity;
use crate::features::points_to::domain::{Context, ContextElement, ObjId};
use crate::features::points_to::ports::{ContextSelector, ReceiverObj};
use crate::shared::models::{MethodId, StmtId};

/// Context-insensitive baseline
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextInsensitiveSelector;

impl ContextSelector for ContextInsensitiveSelector {
    fn name(&self) -> String {
        "insensitive".to_string()
    }

    fn select_context(&self, _caller: &Context, _call_site: StmtId, _callee: MethodId) -> Context {
        Context::empty()
    }

    fn select_instance_context(
        &self,
        _caller: &Context,
        _call_site: StmtId,
        _receiver: ReceiverObj<'_>,
        _callee: MethodId,
    ) -> Context {
        Context::empty()
    }

    fn select_heap_context(&self, _ctx: &Context, _method: MethodId, _obj: ObjId) -> Context {
        Context::empty()
    }
}

/// k-limiting call-string sensitivity (k-CFA)
#[derive(Debug, Clone, Copy)]
pub struct KCallSiteSelector {
    k: usize,
}

impl KCallSiteSelector {
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

impl ContextSelector for KCallSiteSelector {
    fn name(&self) -> String {
        format!("{}-call-site", self.k)
    }

    fn select_context(&self, caller: &Context, call_site: StmtId, _callee: MethodId) -> Context {
        caller.append(ContextElement::CallSite(call_site), self.k)
    }

    fn select_instance_context(
        &self,
        caller: &Context,
        call_site: StmtId,
        _receiver: ReceiverObj<'_>,
        _callee: MethodId,
    ) -> Context {
        caller.append(ContextElement::CallSite(call_site), self.k)
    }

    fn select_heap_context(&self, ctx: &Context, _method: MethodId, _obj: ObjId) -> Context {
        ctx.truncate(self.k.saturating_sub(1))
    }
}

/// k-object sensitivity
///
/// Static calls have no receiver and inherit the caller's context.
#[derive(Debug, Clone, Copy)]
pub struct KObjectSelector {
    k: usize,
}

impl KObjectSelector {
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

impl ContextSelector for KObjectSelector {
    fn name(&self) -> String {
        format!("{}-object", self.k)
    }

    fn select_context(&self, caller: &Context, _call_site: StmtId, _callee: MethodId) -> Context {
        caller.clone()
    }

    fn select_instance_context(
        &self,
        _caller: &Context,
        _call_site: StmtId,
        receiver: ReceiverObj<'_>,
        _callee: MethodId,
    ) -> Context {
        receiver
            .heap_context
            .append(ContextElement::Obj(receiver.id), self.k)
    }

    fn select_heap_context(&self, ctx: &Context, _method: MethodId, _obj: ObjId) -> Context {
        ctx.truncate(self.k.saturating_sub(1))
    }
}

/// k-type sensitivity
///
/// Like object sensitivity, but the element is the class whose method
/// allocated the receiver.
#[derive(Debug, Clone, Copy)]
pub struct KTypeSelector {
    k: usize,
}

impl KTypeSelector {
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

impl ContextSelector for KTypeSelector {
    fn name(&self) -> String {
        format!("{}-type", self.k)
    }

    fn select_context(&self, caller: &Context, _call_site: StmtId, _callee: MethodId) -> Context {
        caller.clone()
    }

    fn select_instance_context(
        &self,
        _caller: &Context,
        _call_site: StmtId,
        receiver: ReceiverObj<'_>,
        _callee: MethodId,
    ) -> Context {
        receiver
            .heap_context
            .append(ContextElement::Type(receiver.obj.container_class), self.k)
    }

    fn select_heap_context(&self, ctx: &Context, _method: MethodId, _obj: ObjId) -> Context {
        ctx.truncate(self.k.saturating_sub(1))
    }
}

/// Build the selector for a configured sensitivity
pub fn selector_for(sensitivity: ContextSensitivity) -> Box<dyn ContextSelector> {
    match sensitivity {
        ContextSensitivity::Insensitive => Box::new(ContextInsensitiveSelector),
        ContextSensitivity::CallSite { k } => Box::new(KCallSiteSelector::new(k)),
        ContextSensitivity::Object { k } => Box::new(KObjectSelector::new(k)),
        ContextSensitivity::Type { k } => Box::new(KTypeSelector::new(k)),
    }
}
