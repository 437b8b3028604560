//! Context-sensitive element managers
//!
//! Get-or-create tables for contexts, pointers, objects, methods and
//! call sites. Equal keys always return the same handle for the lifetime
//! of the manager; handles are never invalidated.
//!
//! The manager also owns the points-to set of every pointer, indexed by
//! [`PointerId`].

use crate::features::points_to::domain::{
    Context, ContextId, CsCallSite, CsCallSiteId, CsMethod, CsMethodId, CsObj, CsObjId, ObjId,
    Pointer, PointerId, PointsToSet,
};
use crate::shared::models::{FieldId, MethodId, StmtId, VarId};
use crate::shared::utils::{Idx, Interner};

#[derive(Debug, Clone)]
pub struct CsManager {
    contexts: Interner<Context, ContextId>,
    pointers: Interner<Pointer, PointerId>,
    points_to: Vec<PointsToSet>,
    objs: Interner<CsObj, CsObjId>,
    methods: Interner<CsMethod, CsMethodId>,
    call_sites: Interner<CsCallSite, CsCallSiteId>,
    empty: ContextId,
}

impl Default for CsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CsManager {
    pub fn new() -> Self {
        let mut contexts = Interner::new();
        let empty = contexts.intern(Context::empty());
        Self {
            contexts,
            pointers: Interner::new(),
            points_to: Vec::new(),
            objs: Interner::new(),
            methods: Interner::new(),
            call_sites: Interner::new(),
            empty,
        }
    }

    // ── contexts ───────────────────────────────────────────────────

    #[inline]
    pub fn empty_context(&self) -> ContextId {
        self.empty
    }

    pub fn context(&mut self, context: Context) -> ContextId {
        self.contexts.intern(context)
    }

    #[inline]
    pub fn context_of(&self, id: ContextId) -> &Context {
        self.contexts.lookup(id)
    }

    // ── pointers ───────────────────────────────────────────────────

    fn pointer_handle(&mut self, key: Pointer) -> PointerId {
        let id = self.pointers.intern(key);
        if id.index() == self.points_to.len() {
            self.points_to.push(PointsToSet::new());
        }
        id
    }

    pub fn var_ptr(&mut self, context: ContextId, var: VarId) -> PointerId {
        self.pointer_handle(Pointer::Var { context, var })
    }

    pub fn static_field(&mut self, field: FieldId) -> PointerId {
        self.pointer_handle(Pointer::StaticField(field))
    }

    pub fn instance_field(&mut self, base: CsObjId, field: FieldId) -> PointerId {
        self.pointer_handle(Pointer::InstanceField { base, field })
    }

    pub fn array_index(&mut self, array: CsObjId) -> PointerId {
        self.pointer_handle(Pointer::ArrayIndex(array))
    }

    /// Existing handle for `key`, without creating one
    #[inline]
    pub fn find_pointer(&self, key: &Pointer) -> Option<PointerId> {
        self.pointers.get(key)
    }

    #[inline]
    pub fn pointer(&self, id: PointerId) -> &Pointer {
        self.pointers.lookup(id)
    }

    #[inline]
    pub fn points_to(&self, id: PointerId) -> &PointsToSet {
        &self.points_to[id.index()]
    }

    #[inline]
    pub fn points_to_mut(&mut self, id: PointerId) -> &mut PointsToSet {
        &mut self.points_to[id.index()]
    }

    /// Every pointer with its points-to set, in creation order
    pub fn pointers(&self) -> impl Iterator<Item = (PointerId, &Pointer, &PointsToSet)> + '_ {
        self.pointers
            .iter()
            .map(move |(id, key)| (id, key, &self.points_to[id.index()]))
    }

    // ── objects, methods, call sites ───────────────────────────────

    pub fn cs_obj(&mut self, context: ContextId, obj: ObjId) -> CsObjId {
        self.objs.intern(CsObj { context, obj })
    }

    #[inline]
    pub fn cs_obj_of(&self, id: CsObjId) -> CsObj {
        *self.objs.lookup(id)
    }

    pub fn cs_method(&mut self, context: ContextId, method: MethodId) -> CsMethodId {
        self.methods.intern(CsMethod { context, method })
    }

    #[inline]
    pub fn cs_method_of(&self, id: CsMethodId) -> CsMethod {
        *self.methods.lookup(id)
    }

    pub fn cs_call_site(&mut self, context: ContextId, call_site: StmtId) -> CsCallSiteId {
        self.call_sites.intern(CsCallSite { context, call_site })
    }

    #[inline]
    pub fn cs_call_site_of(&self, id: CsCallSiteId) -> CsCallSite {
        *self.call_sites.lookup(id)
    }

    // ── counts ─────────────────────────────────────────────────────

    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn cs_obj_count(&self) -> usize {
        self.objs.len()
    }
}
