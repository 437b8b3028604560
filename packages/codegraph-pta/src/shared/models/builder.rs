//! Program builder
//!
//! Incrementally declares classes, fields, methods, variables and
//! statements, then freezes everything into a validated [`Program`].
//! Derived tables (per-variable access indices, return variables, class
//! hierarchy) are computed once in [`ProgramBuilder::build`].

use super::class_hierarchy::ClassHierarchy;
use super::ids::{ClassId, FieldId, MethodId, StmtId, VarId};
use super::program::{
    type_name_with, ClassInfo, FieldInfo, MethodInfo, MethodModifiers, Program, StmtLocation,
    VarIndex, VarInfo,
};
use super::stmt::{CallKind, InvokeExp, MethodRef, Stmt};
use super::types::Type;
use crate::errors::{AnalysisError, Result};
use rustc_hash::FxHashMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct ProgramBuilder {
    classes: Vec<ClassInfo>,
    methods: Vec<MethodInfo>,
    fields: Vec<FieldInfo>,
    vars: Vec<VarInfo>,
    stmts: Vec<Stmt>,
    stmt_locations: Vec<StmtLocation>,
    entry_methods: Vec<MethodId>,
    /// Declaration problems found eagerly, reported by `build`
    problems: Vec<String>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── declarations ───────────────────────────────────────────────

    pub fn add_class(&mut self, name: impl Into<String>, super_class: Option<ClassId>) -> ClassId {
        self.push_class(name.into(), super_class, Vec::new(), false, false)
    }

    pub fn add_abstract_class(
        &mut self,
        name: impl Into<String>,
        super_class: Option<ClassId>,
    ) -> ClassId {
        self.push_class(name.into(), super_class, Vec::new(), false, true)
    }

    /// Interface extending `extends`
    pub fn add_interface(&mut self, name: impl Into<String>, extends: &[ClassId]) -> ClassId {
        self.push_class(name.into(), None, extends.to_vec(), true, true)
    }

    /// Record `class implements iface`
    pub fn implement(&mut self, class: ClassId, iface: ClassId) {
        self.classes[class.0 as usize].interfaces.push(iface);
    }

    fn push_class(
        &mut self,
        name: String,
        super_class: Option<ClassId>,
        interfaces: Vec<ClassId>,
        is_interface: bool,
        is_abstract: bool,
    ) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(ClassInfo {
            name,
            super_class,
            interfaces,
            is_interface,
            is_abstract,
            declared_methods: FxHashMap::default(),
        });
        id
    }

    pub fn add_field(
        &mut self,
        class: ClassId,
        name: impl Into<String>,
        ty: Type,
        is_static: bool,
    ) -> FieldId {
        let id = FieldId(self.fields.len() as u32);
        self.fields.push(FieldInfo {
            name: name.into(),
            class,
            ty,
            is_static,
        });
        id
    }

    /// Declare a method with named parameters
    ///
    /// Parameter variables (and `this` for instance methods) are created
    /// here. The subsignature is `name(T1,T2,...)`.
    pub fn add_method(
        &mut self,
        class: ClassId,
        name: impl Into<String>,
        params: &[(&str, Type)],
        return_type: Type,
        modifiers: MethodModifiers,
    ) -> MethodId {
        let name = name.into();
        let id = MethodId(self.methods.len() as u32);

        let param_types: Vec<String> = params
            .iter()
            .map(|(_, ty)| self.type_name(ty))
            .collect();
        let subsignature = format!("{}({})", name, param_types.join(","));

        let this = if modifiers.is_static {
            None
        } else {
            Some(self.push_var(id, "this".to_string(), Type::class(class)))
        };
        let params = params
            .iter()
            .map(|(pname, ty)| self.push_var(id, (*pname).to_string(), ty.clone()))
            .collect();

        let declared = &mut self.classes[class.0 as usize].declared_methods;
        if declared.insert(subsignature.clone(), id).is_some() {
            self.problems.push(format!(
                "duplicate method {}.{}",
                self.classes[class.0 as usize].name, subsignature
            ));
        }

        self.methods.push(MethodInfo {
            name,
            class,
            subsignature,
            params,
            this,
            return_type,
            modifiers,
            body: Vec::new(),
            return_vars: Vec::new(),
        });
        id
    }

    pub fn add_var(&mut self, method: MethodId, name: impl Into<String>, ty: Type) -> VarId {
        self.push_var(method, name.into(), ty)
    }

    fn push_var(&mut self, method: MethodId, name: String, ty: Type) -> VarId {
        let id = VarId(self.vars.len() as u32);
        self.vars.push(VarInfo { name, method, ty });
        id
    }

    pub fn add_entry_method(&mut self, method: MethodId) {
        if !self.entry_methods.contains(&method) {
            self.entry_methods.push(method);
        }
    }

    // ── accessors used while emitting bodies ───────────────────────

    pub fn param(&self, method: MethodId, index: usize) -> VarId {
        self.methods[method.0 as usize].params[index]
    }

    pub fn this_var(&self, method: MethodId) -> Option<VarId> {
        self.methods[method.0 as usize].this
    }

    /// Symbolic reference to an already declared method
    pub fn method_ref(&self, method: MethodId) -> MethodRef {
        let m = &self.methods[method.0 as usize];
        MethodRef::new(m.class, m.subsignature.clone())
    }

    /// Index the next statement pushed to `method` will get
    pub fn next_index(&self, method: MethodId) -> usize {
        self.methods[method.0 as usize].body.len()
    }

    // ── statements ─────────────────────────────────────────────────

    pub fn push_stmt(&mut self, method: MethodId, stmt: Stmt) -> StmtId {
        let id = StmtId(self.stmts.len() as u32);
        let body = &mut self.methods[method.0 as usize].body;
        self.stmt_locations.push(StmtLocation {
            method,
            index: body.len(),
        });
        body.push(id);
        self.stmts.push(stmt);
        id
    }

    /// `lvalue = new T()`
    pub fn alloc(&mut self, method: MethodId, lvalue: VarId, ty: Type) -> StmtId {
        self.push_stmt(method, Stmt::New { lvalue, ty })
    }

    /// `lvalue = value`
    pub fn assign_int(&mut self, method: MethodId, lvalue: VarId, value: i32) -> StmtId {
        self.push_stmt(method, Stmt::AssignLiteral { lvalue, value })
    }

    /// `lvalue = rvalue`
    pub fn copy(&mut self, method: MethodId, lvalue: VarId, rvalue: VarId) -> StmtId {
        self.push_stmt(method, Stmt::Copy { lvalue, rvalue })
    }

    /// `lvalue = receiver.m(args)` / `lvalue = T.m(args)`
    pub fn invoke(
        &mut self,
        method: MethodId,
        lvalue: Option<VarId>,
        kind: CallKind,
        method_ref: MethodRef,
        receiver: Option<VarId>,
        args: &[VarId],
    ) -> StmtId {
        self.push_stmt(
            method,
            Stmt::Invoke {
                lvalue,
                invoke: InvokeExp {
                    kind,
                    method_ref,
                    receiver,
                    args: args.to_vec(),
                },
            },
        )
    }

    pub fn ret(&mut self, method: MethodId, value: Option<VarId>) -> StmtId {
        self.push_stmt(method, Stmt::Return { value })
    }

    // ── freeze ─────────────────────────────────────────────────────

    pub fn build(self) -> Result<Program> {
        if let Some(problem) = self.problems.first() {
            return Err(AnalysisError::invalid_program(problem.clone()));
        }
        self.validate()?;

        let mut methods = self.methods;
        let mut var_index = vec![VarIndex::default(); self.vars.len()];

        for method in methods.iter_mut() {
            for &sid in &method.body {
                match &self.stmts[sid.0 as usize] {
                    Stmt::LoadField {
                        base: Some(base), ..
                    } => var_index[base.0 as usize].load_fields.push(sid),
                    Stmt::StoreField {
                        base: Some(base), ..
                    } => var_index[base.0 as usize].store_fields.push(sid),
                    Stmt::LoadArray { base, .. } => var_index[base.0 as usize].load_arrays.push(sid),
                    Stmt::StoreArray { base, .. } => {
                        var_index[base.0 as usize].store_arrays.push(sid)
                    }
                    Stmt::Invoke { invoke, .. } => {
                        if let Some(receiver) = invoke.receiver {
                            var_index[receiver.0 as usize].invokes.push(sid);
                        }
                    }
                    Stmt::Return { value: Some(v) } => {
                        if !method.return_vars.contains(v) {
                            method.return_vars.push(*v);
                        }
                    }
                    _ => {}
                }
            }
        }

        let hierarchy = ClassHierarchy::build(&self.classes);
        debug!(
            "Built program: {} classes, {} methods, {} statements",
            self.classes.len(),
            methods.len(),
            self.stmts.len()
        );

        Ok(Program {
            classes: self.classes,
            methods,
            fields: self.fields,
            vars: self.vars,
            stmts: self.stmts,
            stmt_locations: self.stmt_locations,
            var_index,
            entry_methods: self.entry_methods,
            hierarchy,
        })
    }

    fn validate(&self) -> Result<()> {
        for class in &self.classes {
            let parents = class.super_class.iter().chain(class.interfaces.iter());
            for parent in parents {
                if parent.0 as usize >= self.classes.len() {
                    return Err(AnalysisError::invalid_program(format!(
                        "class {} references unknown class #{}",
                        class.name, parent.0
                    )));
                }
            }
        }

        for &entry in &self.entry_methods {
            if entry.0 as usize >= self.methods.len() {
                return Err(AnalysisError::invalid_program(format!("unknown entry method #{}", entry.0)));
            }
        }

        for (mi, method) in self.methods.iter().enumerate() {
            let mid = MethodId(mi as u32);
            let label = format!("{}.{}", self.classes[method.class.0 as usize].name, method.subsignature);

            if !method.has_body() && !method.body.is_empty() {
                return Err(AnalysisError::invalid_program(format!(
                    "{} is abstract or native but has statements",
                    label
                )));
            }

            for (index, &sid) in method.body.iter().enumerate() {
                let stmt = &self.stmts[sid.0 as usize];
                let at = || format!("{}@{}", label, index);

                if let Some(target) = stmt.jump_target() {
                    if target >= method.body.len() {
                        return Err(AnalysisError::invalid_program(format!(
                            "{}: jump target {} out of range",
                            at(),
                            target
                        )));
                    }
                }

                for var in stmt_vars(stmt) {
                    match self.vars.get(var.0 as usize) {
                        Some(info) if info.method == mid => {}
                        Some(_) => {
                            return Err(AnalysisError::invalid_program(format!(
                                "{}: variable {} belongs to another method",
                                at(),
                                self.vars[var.0 as usize].name
                            )))
                        }
                        None => {
                            return Err(AnalysisError::invalid_program(format!(
                                "{}: unknown variable #{}",
                                at(),
                                var.0
                            )))
                        }
                    }
                }

                match stmt {
                    Stmt::LoadField { base, field, .. } | Stmt::StoreField { base, field, .. } => {
                        let Some(info) = self.fields.get(field.0 as usize) else {
                            return Err(AnalysisError::invalid_program(format!(
                                "{}: unknown field #{}",
                                at(),
                                field.0
                            )));
                        };
                        if info.is_static == base.is_some() {
                            return Err(AnalysisError::invalid_program(format!(
                                "{}: field {} accessed with wrong staticness",
                                at(),
                                info.name
                            )));
                        }
                    }
                    Stmt::Invoke { invoke, .. } => {
                        if invoke.kind.has_receiver() != invoke.receiver.is_some() {
                            return Err(AnalysisError::invalid_program(format!(
                                "{}: {} call with mismatched receiver",
                                at(),
                                invoke.kind.as_str()
                            )));
                        }
                        if invoke.method_ref.class.0 as usize >= self.classes.len() {
                            return Err(AnalysisError::invalid_program(format!(
                                "{}: call references unknown class #{}",
                                at(),
                                invoke.method_ref.class.0
                            )));
                        }
                    }
                    Stmt::New { ty, .. } => {
                        if !ty.is_reference() {
                            return Err(AnalysisError::invalid_program(format!(
                                "{}: allocation of non-reference type",
                                at()
                            )));
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn type_name(&self, ty: &Type) -> String {
        type_name_with(ty, &|c| {
            self.classes
                .get(c.0 as usize)
                .map(|class| class.name.clone())
                .unwrap_or_else(|| format!("#{}", c.0))
        })
    }
}

/// Every variable a statement reads or writes
fn stmt_vars(stmt: &Stmt) -> Vec<VarId> {
    match stmt {
        Stmt::New { lvalue, .. } | Stmt::AssignLiteral { lvalue, .. } => vec![*lvalue],
        Stmt::Copy { lvalue, rvalue } => vec![*lvalue, *rvalue],
        Stmt::Binary {
            lvalue,
            operand1,
            operand2,
            ..
        } => vec![*lvalue, *operand1, *operand2],
        Stmt::LoadField { lvalue, base, .. } => {
            let mut vars = vec![*lvalue];
            vars.extend(base);
            vars
        }
        Stmt::StoreField { base, rvalue, .. } => {
            let mut vars = vec![*rvalue];
            vars.extend(base);
            vars
        }
        Stmt::LoadArray {
            lvalue,
            base,
            index,
        } => vec![*lvalue, *base, *index],
        Stmt::StoreArray {
            base,
            index,
            rvalue,
        } => vec![*base, *index, *rvalue],
        Stmt::Invoke { lvalue, invoke } => {
            let mut vars: Vec<VarId> = lvalue.iter().copied().collect();
            vars.extend(invoke.receiver);
            vars.extend(invoke.args.iter().copied());
            vars
        }
        Stmt::Return { value } => value.iter().copied().collect(),
        Stmt::If {
            operand1, operand2, ..
        } => vec![*operand1, *operand2],
        Stmt::Goto { .. } | Stmt::Nop => Vec::new(),
    }
}
