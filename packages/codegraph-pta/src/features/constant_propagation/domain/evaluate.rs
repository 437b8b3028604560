//! Right-hand side evaluation over a constant fact
//!
//! Arithmetic follows 32-bit two's-complement semantics: results wrap,
//! shift counts are masked to their low five bits, and `>>>` shifts in
//! zeros.

use super::fact::CpFact;
use super::value::Value;
use crate::shared::models::{BinaryOp, Exp};

pub fn evaluate(exp: &Exp, fact: &CpFact) -> Value {
    match *exp {
        Exp::Var(var) => fact.get(var),
        Exp::IntLiteral(c) => Value::Constant(c),
        Exp::Binary {
            op,
            operand1,
            operand2,
        } => evaluate_binary(op, fact.get(operand1), fact.get(operand2)),
        Exp::Opaque => Value::NotAConstant,
    }
}

pub fn evaluate_binary(op: BinaryOp, v1: Value, v2: Value) -> Value {
    // x / 0 never completes normally, whatever x is
    if op.is_division_like() && v2 == Value::Constant(0) {
        return Value::Undefined;
    }
    match (v1, v2) {
        (Value::Constant(a), Value::Constant(b)) => Value::Constant(fold(op, a, b)),
        (Value::NotAConstant, _) | (_, Value::NotAConstant) => Value::NotAConstant,
        _ => Value::Undefined,
    }
}

/// `b` is non-zero for division and remainder
fn fold(op: BinaryOp, a: i32, b: i32) -> i32 {
    match op {
        BinaryOp::Add => a.wrapping_add(b),
        BinaryOp::Sub => a.wrapping_sub(b),
        BinaryOp::Mul => a.wrapping_mul(b),
        BinaryOp::Div => a.wrapping_div(b),
        BinaryOp::Rem => a.wrapping_rem(b),
        BinaryOp::Eq => (a == b) as i32,
        BinaryOp::Ne => (a != b) as i32,
        BinaryOp::Lt => (a < b) as i32,
        BinaryOp::Le => (a <= b) as i32,
        BinaryOp::Gt => (a > b) as i32,
        BinaryOp::Ge => (a >= b) as i32,
        BinaryOp::And => a & b,
        BinaryOp::Or => a | b,
        BinaryOp::Xor => a ^ b,
        BinaryOp::Shl => a.wrapping_shl(b as u32),
        BinaryOp::Shr => a.wrapping_shr(b as u32),
        BinaryOp::Ushr => (a as u32).wrapping_shr(b as u32) as i32,
    }
}
