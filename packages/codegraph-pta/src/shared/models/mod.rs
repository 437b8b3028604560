//! Shared models
//!
//! The read-only program model every analysis consumes: entity handles,
//! types, the statement IR, the class hierarchy and the [`Program`]
//! handle itself, plus the [`ProgramBuilder`] that produces it.

mod builder;
mod class_hierarchy;
mod ids;
mod program;
mod stmt;
mod types;

pub use builder::ProgramBuilder;
pub use class_hierarchy::ClassHierarchy;
pub use ids::{ClassId, FieldId, MethodId, StmtId, VarId};
pub use program::{
    ClassInfo, FieldInfo, MethodInfo, MethodModifiers, Program, StmtLocation, VarIndex, VarInfo,
};
pub use stmt::{BinaryOp, CallKind, Exp, InvokeExp, MethodRef, Stmt, Subsignature};
pub use types::{PrimitiveType, Type};
