//! SSA value references.

use core::fmt;

/// A value in a function body.
///
/// Function parameters are the entry block arguments and print as `%argN`.
/// Instruction results are numbered densely from zero and print as `%N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    /// The function parameter at this position.
    Param(u32),
    /// The result of an instruction in the body.
    Result(u32),
}

impl Value {
    /// Get the index of this value within its namespace.
    pub fn index(&self) -> u32 {
        match self {
            Value::Param(i) | Value::Result(i) => *i,
        }
    }

    pub fn is_param(&self) -> bool {
        matches!(self, Value::Param(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Param(i) => write!(f, "%arg{}", i),
            Value::Result(i) => write!(f, "%{}", i),
        }
    }
}
