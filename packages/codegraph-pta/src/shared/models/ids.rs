//! Program entity handles
//!
//! Every entity of the program model is addressed by a dense handle into
//! the owning [`Program`](super::Program) arena.

use crate::define_id;

define_id!(
    /// Class or interface
    ClassId
);
define_id!(
    /// Method (declared in exactly one class)
    MethodId
);
define_id!(
    /// Field (static or instance)
    FieldId
);
define_id!(
    /// Local variable, parameter or `this`
    VarId
);
define_id!(
    /// Statement; call sites and allocation sites are statements
    StmtId
);
