//! Whole-program model
//!
//! Read-only handle over classes, methods, fields, variables and
//! statements. Built once by [`ProgramBuilder`](super::ProgramBuilder) and
//! passed by reference into every analysis; there is no global state.

use super::class_hierarchy::ClassHierarchy;
use super::ids::{ClassId, FieldId, MethodId, StmtId, VarId};
use super::stmt::{Stmt, Subsignature};
use super::types::Type;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct ClassInfo {
    pub name: String,
    pub super_class: Option<ClassId>,
    /// Implemented interfaces (classes) or extended interfaces (interfaces)
    pub interfaces: Vec<ClassId>,
    pub is_interface: bool,
    pub is_abstract: bool,
    pub(crate) declared_methods: FxHashMap<Subsignature, MethodId>,
}

impl ClassInfo {
    pub fn declared_method(&self, subsignature: &str) -> Option<MethodId> {
        self.declared_methods.get(subsignature).copied()
    }
}

/// Method modifiers relevant to dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MethodModifiers {
    pub is_static: bool,
    pub is_abstract: bool,
    /// Body is opaque to the analysis
    pub is_native: bool,
}

impl MethodModifiers {
    pub const INSTANCE: Self = Self {
        is_static: false,
        is_abstract: false,
        is_native: false,
    };
    pub const STATIC: Self = Self {
        is_static: true,
        is_abstract: false,
        is_native: false,
    };
    pub const ABSTRACT: Self = Self {
        is_static: false,
        is_abstract: true,
        is_native: false,
    };

    pub fn native(mut self) -> Self {
        self.is_native = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct MethodInfo {
    pub name: String,
    pub class: ClassId,
    pub subsignature: Subsignature,
    pub params: Vec<VarId>,
    /// Implicit receiver parameter; `None` for static methods
    pub this: Option<VarId>,
    pub return_type: Type,
    pub modifiers: MethodModifiers,
    pub body: Vec<StmtId>,
    /// Variables returned by `return v` statements
    pub return_vars: Vec<VarId>,
}

impl MethodInfo {
    #[inline]
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static
    }

    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract
    }

    #[inline]
    pub fn is_native(&self) -> bool {
        self.modifiers.is_native
    }

    /// Abstract and native methods contribute no statements
    #[inline]
    pub fn has_body(&self) -> bool {
        !self.is_abstract() && !self.is_native()
    }
}

#[derive(Debug, Clone)]
pub struct FieldInfo {
    pub name: String,
    pub class: ClassId,
    pub ty: Type,
    pub is_static: bool,
}

#[derive(Debug, Clone)]
pub struct VarInfo {
    pub name: String,
    pub method: MethodId,
    pub ty: Type,
}

/// Position of a statement inside its method body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StmtLocation {
    pub method: MethodId,
    pub index: usize,
}

/// Statements that access the heap through a variable
///
/// These drive the lazy materialization of field, array and call
/// handling once the variable's points-to set grows.
#[derive(Debug, Clone, Default)]
pub struct VarIndex {
    /// x = v.f
    pub load_fields: Vec<StmtId>,
    /// v.f = x
    pub store_fields: Vec<StmtId>,
    /// x = v[i]
    pub load_arrays: Vec<StmtId>,
    /// v[i] = x
    pub store_arrays: Vec<StmtId>,
    /// v.m(...)
    pub invokes: Vec<StmtId>,
}

#[derive(Debug, Clone)]
pub struct Program {
    pub(crate) classes: Vec<ClassInfo>,
    pub(crate) methods: Vec<MethodInfo>,
    pub(crate) fields: Vec<FieldInfo>,
    pub(crate) vars: Vec<VarInfo>,
    pub(crate) stmts: Vec<Stmt>,
    pub(crate) stmt_locations: Vec<StmtLocation>,
    pub(crate) var_index: Vec<VarIndex>,
    pub(crate) entry_methods: Vec<MethodId>,
    pub(crate) hierarchy: ClassHierarchy,
}

impl Program {
    // ── entity access ──────────────────────────────────────────────

    #[inline]
    pub fn class(&self, id: ClassId) -> &ClassInfo {
        &self.classes[id.0 as usize]
    }

    #[inline]
    pub fn method(&self, id: MethodId) -> &MethodInfo {
        &self.methods[id.0 as usize]
    }

    #[inline]
    pub fn field(&self, id: FieldId) -> &FieldInfo {
        &self.fields[id.0 as usize]
    }

    #[inline]
    pub fn var(&self, id: VarId) -> &VarInfo {
        &self.vars[id.0 as usize]
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.0 as usize]
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    pub fn methods(&self) -> impl Iterator<Item = MethodId> + '_ {
        (0..self.methods.len()).map(|i| MethodId(i as u32))
    }

    #[inline]
    pub fn hierarchy(&self) -> &ClassHierarchy {
        &self.hierarchy
    }

    /// Methods the whole-program run starts from
    #[inline]
    pub fn entry_methods(&self) -> &[MethodId] {
        &self.entry_methods
    }

    // ── IR queries ─────────────────────────────────────────────────

    #[inline]
    pub fn body(&self, method: MethodId) -> &[StmtId] {
        &self.method(method).body
    }

    #[inline]
    pub fn location(&self, stmt: StmtId) -> StmtLocation {
        self.stmt_locations[stmt.0 as usize]
    }

    #[inline]
    pub fn container_of(&self, stmt: StmtId) -> MethodId {
        self.location(stmt).method
    }

    pub fn call_sites_in(&self, method: MethodId) -> impl Iterator<Item = StmtId> + '_ {
        self.body(method)
            .iter()
            .copied()
            .filter(move |&s| self.stmt(s).is_invoke())
    }

    #[inline]
    pub fn var_index(&self, var: VarId) -> &VarIndex {
        &self.var_index[var.0 as usize]
    }

    pub fn declared_method(&self, class: ClassId, subsignature: &str) -> Option<MethodId> {
        self.class(class).declared_method(subsignature)
    }

    // ── lookup by name ─────────────────────────────────────────────

    pub fn find_class(&self, name: &str) -> Option<ClassId> {
        self.classes
            .iter()
            .position(|c| c.name == name)
            .map(|i| ClassId(i as u32))
    }

    pub fn find_method(&self, class_name: &str, subsignature: &str) -> Option<MethodId> {
        self.find_class(class_name)
            .and_then(|c| self.declared_method(c, subsignature))
    }

    pub fn find_var(&self, method: MethodId, name: &str) -> Option<VarId> {
        self.vars
            .iter()
            .position(|v| v.method == method && v.name == name)
            .map(|i| VarId(i as u32))
    }

    // ── display ────────────────────────────────────────────────────

    /// `Class.sub(sig)`
    pub fn method_signature(&self, method: MethodId) -> String {
        let m = self.method(method);
        format!("{}.{}", self.class(m.class).name, m.subsignature)
    }

    /// `Class.sub(sig)@index`
    pub fn stmt_label(&self, stmt: StmtId) -> String {
        let loc = self.location(stmt);
        format!("{}@{}", self.method_signature(loc.method), loc.index)
    }

    pub fn type_name(&self, ty: &Type) -> String {
        type_name_with(ty, &|c| self.class(c).name.clone())
    }
}

pub(crate) fn type_name_with(ty: &Type, class_name: &dyn Fn(ClassId) -> String) -> String {
    match ty {
        Type::Primitive(p) => p.as_str().to_string(),
        Type::Class(c) => class_name(*c),
        Type::Array(elem) => format!("{}[]", type_name_with(elem, class_name)),
        Type::Void => "void".to_string(),
    }
}
