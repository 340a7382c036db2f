//! Binds requested parameter types to named kernel arguments.

use qk_ir::{Type, Value};

use crate::{
    descriptor::{encode, ParameterType},
    error::BuilderError,
};

/// One parameter of a kernel under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelArgument {
    /// Argument name, `arg{position}`.
    pub name: String,
    /// The type the caller asked for.
    pub ty: ParameterType,
    /// Encoding of `ty`.
    pub ir_type: Type,
    /// Zero-based position in the parameter list.
    pub position: usize,
}

impl KernelArgument {
    /// The IR value that refers to this argument inside the kernel body.
    pub fn value(&self) -> Value {
        Value::Param(self.position as u32)
    }
}

/// Produce one argument per requested type, in order.
///
/// Every type is encoded before anything is returned, so an unsupported type
/// anywhere in the list fails the whole call with no partial result. Two
/// arguments of the same type are kept apart by their names alone.
pub fn bind(requested: &[ParameterType]) -> Result<Vec<KernelArgument>, BuilderError> {
    requested
        .iter()
        .enumerate()
        .map(|(position, ty)| -> Result<KernelArgument, BuilderError> {
            Ok(KernelArgument {
                name: format!("arg{}", position),
                ty: ty.clone(),
                ir_type: encode(ty)?,
                position,
            })
        })
        .collect()
}
