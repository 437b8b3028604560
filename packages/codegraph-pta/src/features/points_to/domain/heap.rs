//! Heap abstraction
//!
//! Allocation-site abstraction: every `x = new T()` statement denotes one
//! abstract object, independent of context. Context-qualified objects are
//! built on top of these by the solver.

use crate::define_id;
use crate::shared::models::{ClassId, MethodId, Program, Stmt, StmtId, Type};
use crate::shared::utils::{Idx, Interner};

define_id!(
    /// Abstract heap object
    ObjId
);

/// Abstract object identified by its allocation site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obj {
    pub alloc_site: StmtId,
    /// Declared (dynamic) type of the allocation
    pub ty: Type,
    /// Method containing the allocation site
    pub container: MethodId,
    /// Class declaring `container`
    pub container_class: ClassId,
}

/// Allocation site → abstract object mapping
#[derive(Debug, Clone, Default)]
pub struct HeapModel {
    sites: Interner<StmtId, ObjId>,
    objs: Vec<Obj>,
}

impl HeapModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abstract object of an allocation statement
    ///
    /// Returns `None` if `site` is not an allocation.
    pub fn obj_for(&mut self, program: &Program, site: StmtId) -> Option<ObjId> {
        if let Some(id) = self.sites.get(&site) {
            return Some(id);
        }
        let Stmt::New { ty, .. } = program.stmt(site) else {
            return None;
        };
        let container = program.container_of(site);
        let id = self.sites.intern(site);
        debug_assert_eq!(id.index(), self.objs.len());
        self.objs.push(Obj {
            alloc_site: site,
            ty: ty.clone(),
            container,
            container_class: program.method(container).class,
        });
        Some(id)
    }

    #[inline]
    pub fn obj(&self, id: ObjId) -> &Obj {
        &self.objs[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjId, &Obj)> + '_ {
        self.objs
            .iter()
            .enumerate()
            .map(|(i, obj)| (ObjId::from_usize(i), obj))
    }
}
