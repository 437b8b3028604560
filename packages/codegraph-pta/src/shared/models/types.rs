//! Declared types of variables, fields and allocation sites

use super::ids::ClassId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    /// Whether values of this type are tracked by integer constant propagation
    pub fn can_hold_int(self) -> bool {
        matches!(
            self,
            PrimitiveType::Boolean
                | PrimitiveType::Byte
                | PrimitiveType::Char
                | PrimitiveType::Short
                | PrimitiveType::Int
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }
}

/// Type of a program value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Primitive(PrimitiveType),
    /// Class or interface type
    Class(ClassId),
    Array(Box<Type>),
    Void,
}

impl Type {
    pub const INT: Type = Type::Primitive(PrimitiveType::Int);
    pub const BOOLEAN: Type = Type::Primitive(PrimitiveType::Boolean);

    #[inline]
    pub fn class(id: ClassId) -> Self {
        Type::Class(id)
    }

    #[inline]
    pub fn array_of(elem: Type) -> Self {
        Type::Array(Box::new(elem))
    }

    pub fn can_hold_int(&self) -> bool {
        match self {
            Type::Primitive(p) => p.can_hold_int(),
            _ => false,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Type::Class(_) | Type::Array(_))
    }

    pub fn as_class(&self) -> Option<ClassId> {
        match self {
            Type::Class(id) => Some(*id),
            _ => None,
        }
    }
}
