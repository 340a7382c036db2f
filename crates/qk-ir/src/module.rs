//! Modules for multi-kernel programs.

use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::fmt;

use crate::{attribute::Attribute, function::Function};

/// A module containing multiple functions.
///
/// A module is the top-level unit of compilation, containing:
/// - Module-level attributes
/// - Functions, keyed by symbol name
///
/// Functions are kept sorted by name so printing is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    /// Module attributes in insertion order.
    pub attributes: Vec<Attribute>,
    /// Functions in this module, indexed by name.
    pub functions: BTreeMap<String, Function>,
}

impl Module {
    /// Create a new empty module.
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
            functions: BTreeMap::new(),
        }
    }

    /// Add a function to this module.
    ///
    /// Returns the function back if one with the same name already exists.
    pub fn add_function(&mut self, func: Function) -> Result<(), Function> {
        if self.functions.contains_key(&func.name) {
            return Err(func);
        }
        self.functions.insert(func.name.clone(), func);
        Ok(())
    }

    /// Get a function by name.
    pub fn get_function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Get a mutable reference to a function by name.
    pub fn get_function_mut(&mut self, name: &str) -> Option<&mut Function> {
        self.functions.get_mut(name)
    }

    /// Remove a function by name.
    pub fn remove_function(&mut self, name: &str) -> Option<Function> {
        self.functions.remove(name)
    }

    /// Set a module attribute, replacing any attribute of the same name.
    pub fn set_attribute(&mut self, attr: Attribute) {
        match self.attributes.iter_mut().find(|a| a.name == attr.name) {
            Some(existing) => *existing = attr,
            None => self.attributes.push(attr),
        }
    }

    /// Functions carrying the entry-point attribute, in name order.
    pub fn entry_points(&self) -> impl Iterator<Item = &Function> {
        self.functions.values().filter(|f| f.is_entrypoint())
    }

    /// Get the number of functions in this module.
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Get all function names.
    pub fn function_names(&self) -> Vec<&String> {
        self.functions.keys().collect()
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::write::write_module(f, self)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::Signature;

    fn func(name: &str) -> Function {
        Function::new(name.to_string(), Signature::empty())
    }

    #[test]
    fn test_module_creation() {
        let module = Module::new();
        assert_eq!(module.function_count(), 0);
        assert_eq!(module.entry_points().count(), 0);
    }

    #[test]
    fn test_module_add_function() {
        let mut module = Module::new();
        module.add_function(func("test")).unwrap();
        assert_eq!(module.function_count(), 1);
        assert!(module.get_function("test").is_some());
    }

    #[test]
    fn test_module_duplicate_function() {
        let mut module = Module::new();
        module.add_function(func("test")).unwrap();
        let rejected = module.add_function(func("test")).unwrap_err();
        assert_eq!(rejected.name, "test");
        assert_eq!(module.function_count(), 1);
    }

    #[test]
    fn test_entry_points() {
        let mut module = Module::new();
        let mut entry = func("b");
        entry.add_attribute(Attribute::entrypoint());
        module.add_function(func("a")).unwrap();
        module.add_function(entry).unwrap();
        let names: Vec<&str> = module.entry_points().map(|f| f.name()).collect();
        assert_eq!(names, ["b"]);
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut module = Module::new();
        module.set_attribute(Attribute::with_value("quake.target", "a"));
        module.set_attribute(Attribute::with_value("quake.target", "b"));
        assert_eq!(module.attributes.len(), 1);
        assert_eq!(module.attributes[0].value.as_deref(), Some("b"));
    }
}
