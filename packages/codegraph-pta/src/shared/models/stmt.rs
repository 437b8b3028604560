//! Statement IR
//!
//! A closed set of three-address statements. Each variant carries exactly
//! the operands the pointer analysis and the dataflow clients read:
//! - New:    x = new T()        → allocation site
//! - Copy:   x = y
//! - Load:   x = y.f / x = T.f / x = a[i]
//! - Store:  y.f = x / T.f = x / a[i] = x
//! - Invoke: r = o.m(a1, ..., an) / r = T.m(...)
//! - Control flow: If / Goto / Return

use super::ids::{ClassId, FieldId, VarId};
use serde::{Deserialize, Serialize};

/// Method subsignature, e.g. `m(int,A)`
pub type Subsignature = String;

/// Dispatch kind of a call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CallKind {
    /// Statically bound call (no receiver)
    Static,
    /// Constructor, private or super call: dispatched from the declaring class
    Special,
    /// Virtual call on a class type
    Virtual,
    /// Virtual call on an interface type
    Interface,
}

impl CallKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallKind::Static => "STATIC",
            CallKind::Special => "SPECIAL",
            CallKind::Virtual => "VIRTUAL",
            CallKind::Interface => "INTERFACE",
        }
    }

    #[inline]
    pub fn has_receiver(&self) -> bool {
        !matches!(self, CallKind::Static)
    }
}

/// Symbolic method reference at a call site
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodRef {
    /// Declaring class (static receiver type for virtual calls)
    pub class: ClassId,
    pub subsignature: Subsignature,
}

impl MethodRef {
    pub fn new(class: ClassId, subsignature: impl Into<Subsignature>) -> Self {
        Self {
            class,
            subsignature: subsignature.into(),
        }
    }
}

/// Binary operators over 32-bit integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    // Condition
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Bitwise
    And,
    Or,
    Xor,
    // Shift
    Shl,
    Shr,
    Ushr,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Ushr => ">>>",
        }
    }

    #[inline]
    pub fn is_division_like(&self) -> bool {
        matches!(self, BinaryOp::Div | BinaryOp::Rem)
    }

    #[inline]
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }
}

/// Call expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvokeExp {
    pub kind: CallKind,
    pub method_ref: MethodRef,
    /// Receiver variable; `None` iff `kind` is static
    pub receiver: Option<VarId>,
    pub args: Vec<VarId>,
}

/// Right-hand side of a definition, as seen by expression evaluators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exp {
    Var(VarId),
    IntLiteral(i32),
    Binary {
        op: BinaryOp,
        operand1: VarId,
        operand2: VarId,
    },
    /// Any value the evaluator cannot see through (allocation, heap load, call result)
    Opaque,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stmt {
    /// x = new T()
    New { lvalue: VarId, ty: super::Type },

    /// x = 42
    AssignLiteral { lvalue: VarId, value: i32 },

    /// x = y
    Copy { lvalue: VarId, rvalue: VarId },

    /// x = y op z
    Binary {
        lvalue: VarId,
        op: BinaryOp,
        operand1: VarId,
        operand2: VarId,
    },

    /// x = y.f (instance) or x = T.f (`base` is `None`)
    LoadField {
        lvalue: VarId,
        base: Option<VarId>,
        field: FieldId,
    },

    /// y.f = x (instance) or T.f = x (`base` is `None`)
    StoreField {
        base: Option<VarId>,
        field: FieldId,
        rvalue: VarId,
    },

    /// x = a[i]
    LoadArray {
        lvalue: VarId,
        base: VarId,
        index: VarId,
    },

    /// a[i] = x
    StoreArray {
        base: VarId,
        index: VarId,
        rvalue: VarId,
    },

    /// r = o.m(...) or o.m(...)
    Invoke {
        lvalue: Option<VarId>,
        invoke: InvokeExp,
    },

    Return { value: Option<VarId> },

    /// if (a op b) goto target
    If {
        op: BinaryOp,
        operand1: VarId,
        operand2: VarId,
        /// Index into the containing method body
        target: usize,
    },

    /// goto target
    Goto { target: usize },

    Nop,
}

impl Stmt {
    /// Defined variable and right-hand side, for definition statements
    pub fn definition(&self) -> Option<(VarId, Exp)> {
        match self {
            Stmt::New { lvalue, .. } => Some((*lvalue, Exp::Opaque)),
            Stmt::AssignLiteral { lvalue, value } => Some((*lvalue, Exp::IntLiteral(*value))),
            Stmt::Copy { lvalue, rvalue } => Some((*lvalue, Exp::Var(*rvalue))),
            Stmt::Binary {
                lvalue,
                op,
                operand1,
                operand2,
            } => Some((
                *lvalue,
                Exp::Binary {
                    op: *op,
                    operand1: *operand1,
                    operand2: *operand2,
                },
            )),
            Stmt::LoadField { lvalue, .. } | Stmt::LoadArray { lvalue, .. } => {
                Some((*lvalue, Exp::Opaque))
            }
            Stmt::Invoke {
                lvalue: Some(lvalue),
                ..
            } => Some((*lvalue, Exp::Opaque)),
            Stmt::Invoke { lvalue: None, .. }
            | Stmt::StoreField { .. }
            | Stmt::StoreArray { .. }
            | Stmt::Return { .. }
            | Stmt::If { .. }
            | Stmt::Goto { .. }
            | Stmt::Nop => None,
        }
    }

    #[inline]
    pub fn is_invoke(&self) -> bool {
        matches!(self, Stmt::Invoke { .. })
    }

    /// Result variable and call expression of an invoke
    pub fn as_invoke(&self) -> Option<(Option<VarId>, &InvokeExp)> {
        match self {
            Stmt::Invoke { lvalue, invoke } => Some((*lvalue, invoke)),
            _ => None,
        }
    }

    /// Whether control can fall through to the next statement
    pub fn falls_through(&self) -> bool {
        !matches!(self, Stmt::Goto { .. } | Stmt::Return { .. })
    }

    /// Explicit jump target inside the method body
    pub fn jump_target(&self) -> Option<usize> {
        match self {
            Stmt::If { target, .. } | Stmt::Goto { target } => Some(*target),
            _ => None,
        }
    }
}
