//! IR instructions.

use alloc::{vec, vec::Vec};

use crate::{types::Type, value::Value};

/// An IR instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    // Constants
    /// Integer constant: `%r = arith.constant 42 : i64`
    ConstInt { result: Value, value: i64, ty: Type },
    /// Floating point constant: `%r = arith.constant 1.5 : f64`
    /// Note: Uses u64 to represent f64 bits for Eq compatibility
    ConstFloat {
        result: Value,
        value_bits: u64,
        ty: Type,
    },

    // Containers
    /// Length of a dynamic vector: `%r = cc.stdvec_size %arg0 : (!cc.stdvec<f64>) -> i64`
    StdvecSize {
        result: Value,
        vector: Value,
        vector_ty: Type,
    },

    // Control flow
    /// Return from the kernel
    Return,
}

impl Inst {
    /// Float constant from an `f64`.
    pub fn const_float(result: Value, value: f64, ty: Type) -> Self {
        Inst::ConstFloat {
            result,
            value_bits: value.to_bits(),
            ty,
        }
    }

    /// Get the result value produced by this instruction, if any.
    pub fn result(&self) -> Option<Value> {
        match self {
            Inst::ConstInt { result, .. }
            | Inst::ConstFloat { result, .. }
            | Inst::StdvecSize { result, .. } => Some(*result),
            Inst::Return => None,
        }
    }

    /// Type of the produced value, if any.
    pub fn result_type(&self) -> Option<Type> {
        match self {
            Inst::ConstInt { ty, .. } | Inst::ConstFloat { ty, .. } => Some(ty.clone()),
            Inst::StdvecSize { .. } => Some(Type::I64),
            Inst::Return => None,
        }
    }

    /// Get the argument values used by this instruction.
    pub fn args(&self) -> Vec<Value> {
        match self {
            Inst::ConstInt { .. } | Inst::ConstFloat { .. } | Inst::Return => Vec::new(),
            Inst::StdvecSize { vector, .. } => vec![*vector],
        }
    }

    /// Whether this instruction ends the body.
    pub fn is_terminator(&self) -> bool {
        matches!(self, Inst::Return)
    }
}
