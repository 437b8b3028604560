//! Method dispatch
//!
//! Resolution of a method reference against one known class. Shared by
//! CHA (applied to every class below the receiver type) and the points-to
//! solver (applied to the dynamic type of each receiver object).

use crate::errors::{AnalysisError, Result};
use crate::shared::models::{CallKind, ClassId, InvokeExp, MethodId, MethodRef, Program, Type};

/// First concrete method matching `subsignature`, walking up from `class`
pub fn dispatch(program: &Program, class: ClassId, subsignature: &str) -> Option<MethodId> {
    program
        .hierarchy()
        .super_chain(class)
        .filter_map(|c| program.declared_method(c, subsignature))
        .find(|&m| !program.method(m).is_abstract())
}

/// Statically bound target of a static call
///
/// Static methods may be inherited, so the superclass chain of the
/// referenced class is searched too.
pub fn resolve_static(program: &Program, method_ref: &MethodRef) -> Result<MethodId> {
    program
        .hierarchy()
        .super_chain(method_ref.class)
        .find_map(|c| program.declared_method(c, &method_ref.subsignature))
        .ok_or_else(|| unresolved(program, method_ref.class, &method_ref.subsignature))
}

/// Target of a call given the dynamic type of its receiver
///
/// `receiver_type` is ignored for static and special calls.
pub fn resolve_callee(
    program: &Program,
    receiver_type: Option<&Type>,
    invoke: &InvokeExp,
) -> Result<MethodId> {
    let method_ref = &invoke.method_ref;
    match invoke.kind {
        CallKind::Static => resolve_static(program, method_ref),
        CallKind::Special => dispatch(program, method_ref.class, &method_ref.subsignature)
            .ok_or_else(|| unresolved(program, method_ref.class, &method_ref.subsignature)),
        CallKind::Virtual | CallKind::Interface => {
            let class = match receiver_type {
                Some(Type::Class(class)) => *class,
                Some(other) => {
                    return Err(AnalysisError::UnresolvedMethod {
                        class: program.type_name(other),
                        subsignature: method_ref.subsignature.clone(),
                    })
                }
                None => method_ref.class,
            };
            dispatch(program, class, &method_ref.subsignature)
                .ok_or_else(|| unresolved(program, class, &method_ref.subsignature))
        }
    }
}

pub(crate) fn unresolved(program: &Program, class: ClassId, subsignature: &str) -> AnalysisError {
    AnalysisError::UnresolvedMethod {
        class: program.class(class).name.clone(),
        subsignature: subsignature.to_string(),
    }
}
