//! Kernel parameter types and their IR encodings.
//!
//! Parameter types arrive at runtime, so they are modelled as a closed enum
//! and encoded with a single match rather than through reflection. Encoding
//! is pure: it depends only on the type passed in.

use std::fmt;

use qk_ir::Type;

use crate::error::BuilderError;

/// Scalar parameter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int8,
    Int32,
    Int64,
    Float32,
    Float64,
    /// Complex number with 64-bit float parts.
    Complex64,
}

impl ScalarKind {
    fn encode(self) -> Type {
        match self {
            ScalarKind::Bool => Type::I1,
            ScalarKind::Int8 => Type::I8,
            ScalarKind::Int32 => Type::I32,
            ScalarKind::Int64 => Type::I64,
            ScalarKind::Float32 => Type::F32,
            ScalarKind::Float64 => Type::F64,
            ScalarKind::Complex64 => Type::complex(Type::F64),
        }
    }

    fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int8 => "int8",
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::Float32 => "float32",
            ScalarKind::Float64 => "float64",
            ScalarKind::Complex64 => "complex64",
        }
    }
}

/// The type of one kernel parameter, as requested by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParameterType {
    /// A single scalar.
    Scalar(ScalarKind),
    /// A sequence whose length is only known at call time.
    DynamicSequence(Box<ParameterType>),
    /// An ordered group of fields.
    Aggregate(Vec<ParameterType>),
    /// A host type that was passed through without classification. It has
    /// no IR encoding.
    Host(String),
}

impl ParameterType {
    pub fn scalar(kind: ScalarKind) -> Self {
        ParameterType::Scalar(kind)
    }

    /// A dynamic sequence of `element`.
    pub fn sequence(element: ParameterType) -> Self {
        ParameterType::DynamicSequence(Box::new(element))
    }

    /// The host `list` type: a dynamic sequence of 64-bit floats.
    pub fn list() -> Self {
        Self::sequence(ParameterType::Scalar(ScalarKind::Float64))
    }

    pub fn float64() -> Self {
        ParameterType::Scalar(ScalarKind::Float64)
    }

    pub fn int64() -> Self {
        ParameterType::Scalar(ScalarKind::Int64)
    }

    pub fn host(name: impl Into<String>) -> Self {
        ParameterType::Host(name.into())
    }

    /// Whether [`encode`] succeeds for this type.
    pub fn is_supported(&self) -> bool {
        encode(self).is_ok()
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterType::Scalar(kind) => write!(f, "{}", kind.name()),
            ParameterType::DynamicSequence(elem) => write!(f, "list[{}]", elem),
            ParameterType::Aggregate(fields) => {
                write!(f, "tuple[")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", field)?;
                }
                write!(f, "]")
            }
            ParameterType::Host(name) => write!(f, "{}", name),
        }
    }
}

/// Encode a parameter type as an IR type.
///
/// Fails with [`BuilderError::UnsupportedType`] naming the innermost type that
/// has no encoding: host types, and aggregates with no fields.
pub fn encode(ty: &ParameterType) -> Result<Type, BuilderError> {
    match ty {
        ParameterType::Scalar(kind) => Ok(kind.encode()),
        ParameterType::DynamicSequence(elem) => Ok(Type::stdvec(encode(elem)?)),
        ParameterType::Aggregate(fields) if fields.is_empty() => {
            Err(BuilderError::UnsupportedType { ty: ty.to_string() })
        }
        ParameterType::Aggregate(fields) => Ok(Type::Struct(
            fields.iter().map(encode).collect::<Result<_, _>>()?,
        )),
        ParameterType::Host(_) => Err(BuilderError::UnsupportedType { ty: ty.to_string() }),
    }
}

/// Recover the parameter type an IR type was encoded from.
///
/// Encoding is injective, so every encodable IR type has exactly one source.
impl TryFrom<&Type> for ParameterType {
    type Error = BuilderError;

    fn try_from(ty: &Type) -> Result<Self, Self::Error> {
        let scalar = |kind| Ok(ParameterType::Scalar(kind));
        match ty {
            Type::I1 => scalar(ScalarKind::Bool),
            Type::I8 => scalar(ScalarKind::Int8),
            Type::I32 => scalar(ScalarKind::Int32),
            Type::I64 => scalar(ScalarKind::Int64),
            Type::F32 => scalar(ScalarKind::Float32),
            Type::F64 => scalar(ScalarKind::Float64),
            Type::Complex(elem) if **elem == Type::F64 => scalar(ScalarKind::Complex64),
            Type::StdVec(elem) => Ok(ParameterType::sequence(ParameterType::try_from(
                elem.as_ref(),
            )?)),
            Type::Struct(fields) if !fields.is_empty() => Ok(ParameterType::Aggregate(
                fields
                    .iter()
                    .map(ParameterType::try_from)
                    .collect::<Result<_, _>>()?,
            )),
            _ => Err(BuilderError::UnsupportedType { ty: ty.to_string() }),
        }
    }
}
