//! Constant lattice
//!
//! ```text
//!            NAC
//!   ... -1   0   1 ...
//!          UNDEF
//! ```
//! `meet` moves down toward NAC: UNDEF is the identity, NAC absorbs,
//! equal constants stay, distinct constants give NAC.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Undefined,
    Constant(i32),
    NotAConstant,
}

impl Value {
    #[inline]
    pub fn is_undefined(self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    pub fn is_nac(self) -> bool {
        matches!(self, Value::NotAConstant)
    }

    #[inline]
    pub fn is_constant(self) -> bool {
        matches!(self, Value::Constant(_))
    }

    #[inline]
    pub fn as_constant(self) -> Option<i32> {
        match self {
            Value::Constant(c) => Some(c),
            _ => None,
        }
    }

    pub fn meet(self, other: Value) -> Value {
        match (self, other) {
            (Value::NotAConstant, _) | (_, Value::NotAConstant) => Value::NotAConstant,
            (Value::Undefined, v) | (v, Value::Undefined) => v,
            (Value::Constant(a), Value::Constant(b)) if a == b => Value::Constant(a),
            (Value::Constant(_), Value::Constant(_)) => Value::NotAConstant,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "UNDEF"),
            Value::Constant(c) => write!(f, "{}", c),
            Value::NotAConstant => write!(f, "NAC"),
        }
    }
}
