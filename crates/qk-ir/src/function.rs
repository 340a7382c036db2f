//! Functions.

use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::{
    attribute::{Attribute, ENTRYPOINT_ATTR},
    block::Block,
    signature::Signature,
    types::Type,
    value::Value,
};

/// A function in the IR.
///
/// A function consists of:
/// - A symbol name, unique within its module
/// - A signature (parameter types)
/// - Attributes, such as the entry-point marker
/// - A single body block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Symbol name, printed as `@name`.
    pub name: String,
    /// Function signature.
    pub signature: Signature,
    /// Attributes in insertion order.
    pub attributes: Vec<Attribute>,
    /// Body region.
    pub body: Block,
}

impl Function {
    /// Create a new function with an empty body.
    pub fn new(name: String, signature: Signature) -> Self {
        Self {
            name,
            signature,
            attributes: Vec::new(),
            body: Block::new(),
        }
    }

    /// Get the function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an attribute. Adding an attribute with a name already present is a
    /// no-op, so attribute names stay unique.
    pub fn add_attribute(&mut self, attr: Attribute) {
        if !self.has_attribute(&attr.name) {
            self.attributes.push(attr);
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Whether this function is marked as a kernel entry point.
    pub fn is_entrypoint(&self) -> bool {
        self.has_attribute(ENTRYPOINT_ATTR)
    }

    /// Get the number of parameters.
    pub fn param_count(&self) -> usize {
        self.signature.param_count()
    }

    /// Type of a parameter or instruction result, if it exists in this function.
    pub fn value_type(&self, value: Value) -> Option<Type> {
        match value {
            Value::Param(i) => self.signature.param(i as usize).cloned(),
            Value::Result(_) => self
                .body
                .insts
                .iter()
                .find(|inst| inst.result() == Some(value))
                .and_then(|inst| inst.result_type()),
        }
    }

    /// The next unused result number.
    pub fn next_result_index(&self) -> u32 {
        self.body
            .insts
            .iter()
            .filter_map(|inst| inst.result())
            .map(|v| v.index() + 1)
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::write::write_function(f, self, 0)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use super::*;
    use crate::inst::Inst;

    fn sample() -> Function {
        let mut func = Function::new(
            "kernel".to_string(),
            Signature::new(vec![Type::stdvec(Type::F64)]),
        );
        func.body = Block::with_return();
        func
    }

    #[test]
    fn test_function_creation() {
        let func = sample();
        assert_eq!(func.name(), "kernel");
        assert_eq!(func.param_count(), 1);
        assert!(!func.is_entrypoint());
        assert_eq!(func.next_result_index(), 0);
    }

    #[test]
    fn test_attributes_are_unique() {
        let mut func = sample();
        func.add_attribute(Attribute::entrypoint());
        func.add_attribute(Attribute::entrypoint());
        assert_eq!(func.attributes.len(), 1);
        assert!(func.is_entrypoint());
    }

    #[test]
    fn test_value_type() {
        let mut func = sample();
        func.body.insert_before_terminator(Inst::StdvecSize {
            result: Value::Result(0),
            vector: Value::Param(0),
            vector_ty: Type::stdvec(Type::F64),
        });
        assert_eq!(func.value_type(Value::Param(0)), Some(Type::stdvec(Type::F64)));
        assert_eq!(func.value_type(Value::Result(0)), Some(Type::I64));
        assert_eq!(func.value_type(Value::Param(1)), None);
        assert_eq!(func.value_type(Value::Result(1)), None);
        assert_eq!(func.next_result_index(), 1);
    }
}
