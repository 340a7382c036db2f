//! Type system for the IR.

use alloc::{boxed::Box, vec::Vec};
use core::fmt;

/// A type in the IR.
///
/// Scalars print with their builtin spelling (`i64`, `f64`). Containers use the
/// `cc` dialect spelling (`!cc.stdvec<f64>`, `!cc.struct<{f64, i64}>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// 1-bit integer (booleans)
    I1,
    /// 8-bit integer
    I8,
    /// 32-bit integer
    I32,
    /// 64-bit integer
    I64,
    /// 32-bit floating point
    F32,
    /// 64-bit floating point
    F64,
    /// Complex number over a floating point element type
    Complex(Box<Type>),
    /// Dynamically-sized vector; the length is only known at call time
    StdVec(Box<Type>),
    /// Aggregate with ordered, unnamed fields
    Struct(Vec<Type>),
}

impl Type {
    /// Dynamic vector of `elem`.
    pub fn stdvec(elem: Type) -> Self {
        Type::StdVec(Box::new(elem))
    }

    /// Complex number over `elem`.
    pub fn complex(elem: Type) -> Self {
        Type::Complex(Box::new(elem))
    }

    /// Get the size of this type in bytes, for types with a fixed layout.
    ///
    /// Dynamic vectors have no static size and return `None`.
    pub fn size_bytes(&self) -> Option<usize> {
        match self {
            Type::I1 | Type::I8 => Some(1),
            Type::I32 | Type::F32 => Some(4),
            Type::I64 | Type::F64 => Some(8),
            Type::Complex(elem) => elem.size_bytes().map(|s| s * 2),
            Type::StdVec(_) => None,
            Type::Struct(fields) => fields.iter().map(Type::size_bytes).sum(),
        }
    }

    /// Check if this is an integer type.
    pub fn is_integer(&self) -> bool {
        matches!(self, Type::I1 | Type::I8 | Type::I32 | Type::I64)
    }

    /// Inclusive range of constants an integer type can hold. `i1` holds the
    /// booleans `0` and `1`; the wider types are signed.
    pub fn int_bounds(&self) -> Option<(i64, i64)> {
        match self {
            Type::I1 => Some((0, 1)),
            Type::I8 => Some((i8::MIN as i64, i8::MAX as i64)),
            Type::I32 => Some((i32::MIN as i64, i32::MAX as i64)),
            Type::I64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// Whether `value` is a valid integer constant of this type.
    pub fn fits_int(&self, value: i64) -> bool {
        self.int_bounds()
            .is_some_and(|(min, max)| (min..=max).contains(&value))
    }

    /// Check if this is a floating point type.
    pub fn is_float(&self) -> bool {
        matches!(self, Type::F32 | Type::F64)
    }

    /// Check if this is a dynamically-sized vector.
    pub fn is_stdvec(&self) -> bool {
        matches!(self, Type::StdVec(_))
    }

    /// Element type of a dynamic vector.
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::StdVec(elem) => Some(elem),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::I1 => write!(f, "i1"),
            Type::I8 => write!(f, "i8"),
            Type::I32 => write!(f, "i32"),
            Type::I64 => write!(f, "i64"),
            Type::F32 => write!(f, "f32"),
            Type::F64 => write!(f, "f64"),
            Type::Complex(elem) => write!(f, "complex<{}>", elem),
            Type::StdVec(elem) => write!(f, "!cc.stdvec<{}>", elem),
            Type::Struct(fields) => {
                write!(f, "!cc.struct<{{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", field)?;
                }
                write!(f, "}}>")
            }
        }
    }
}
