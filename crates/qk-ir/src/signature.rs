//! Function signatures.

use alloc::vec::Vec;

use crate::types::Type;

/// A kernel signature.
///
/// Kernels take their arguments by value and produce no results, so only the
/// parameter types are recorded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    /// Parameter types, in position order.
    pub params: Vec<Type>,
}

impl Signature {
    /// Create a new signature with the given parameters.
    pub fn new(params: Vec<Type>) -> Self {
        Self { params }
    }

    /// Create a signature with no parameters.
    pub fn empty() -> Self {
        Self { params: Vec::new() }
    }

    /// Get the number of parameters.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Type of the parameter at `index`.
    pub fn param(&self, index: usize) -> Option<&Type> {
        self.params.get(index)
    }
}
