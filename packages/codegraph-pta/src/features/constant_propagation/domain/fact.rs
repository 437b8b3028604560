//! Constant propagation fact: variable → lattice value
//!
//! Absent variables are UNDEF. Binding a variable to UNDEF removes it, so
//! two facts are equal exactly when they agree on every variable.

use super::value::Value;
use crate::shared::models::VarId;
use rustc_hash::FxHashMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpFact {
    values: FxHashMap<VarId, Value>,
}

impl CpFact {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, var: VarId) -> Value {
        self.values.get(&var).copied().unwrap_or(Value::Undefined)
    }

    /// Returns `true` if the binding of `var` changed
    pub fn update(&mut self, var: VarId, value: Value) -> bool {
        if value.is_undefined() {
            self.values.remove(&var).is_some()
        } else {
            self.values.insert(var, value) != Some(value)
        }
    }

    pub fn remove(&mut self, var: VarId) -> Value {
        self.values.remove(&var).unwrap_or(Value::Undefined)
    }

    /// `self = self ⊓ other`, pointwise
    pub fn meet_with(&mut self, other: &CpFact) {
        for (&var, &value) in &other.values {
            let met = self.get(var).meet(value);
            self.update(var, met);
        }
    }

    /// Bindings sorted by variable
    pub fn entries(&self) -> Vec<(VarId, Value)> {
        let mut entries: Vec<(VarId, Value)> = self.values.iter().map(|(&v, &c)| (v, c)).collect();
        entries.sort_by_key(|(var, _)| *var);
        entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(VarId, Value)> for CpFact {
    fn from_iter<T: IntoIterator<Item = (VarId, Value)>>(iter: T) -> Self {
        let mut fact = CpFact::new();
        for (var, value) in iter {
            fact.update(var, value);
        }
        fact
    }
}

impl fmt::Display for CpFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, value)) in self.entries().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "v{}={}", var.0, value)?;
        }
        write!(f, "}}")
    }
}
