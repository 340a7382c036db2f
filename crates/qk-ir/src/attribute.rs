//! Function and module attributes.

use alloc::string::{String, ToString};
use core::fmt;

/// Marks a function as an externally invocable kernel entry point.
pub const ENTRYPOINT_ATTR: &str = "cudaq-entrypoint";

/// Marks a function as a quantum kernel (entry point or not).
pub const KERNEL_ATTR: &str = "cudaq-kernel";

/// A named attribute, optionally carrying a string value.
///
/// Unit attributes print as their name alone. Names that are not bare
/// identifiers are quoted, so `cudaq-entrypoint` prints as `"cudaq-entrypoint"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Attribute {
    /// An attribute with no value.
    pub fn unit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// An attribute with a string value.
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn entrypoint() -> Self {
        Self::unit(ENTRYPOINT_ATTR)
    }

    pub fn kernel() -> Self {
        Self::unit(KERNEL_ATTR)
    }
}

/// Whether `name` can be printed without quotes.
pub(crate) fn is_bare_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '$')
}

pub(crate) fn escape(s: &str) -> String {
    if !s.contains(['"', '\\']) {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_bare_name(&self.name) {
            write!(f, "{}", self.name)?;
        } else {
            write!(f, "\"{}\"", escape(&self.name))?;
        }
        if let Some(value) = &self.value {
            write!(f, " = \"{}\"", escape(value))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn test_entrypoint_is_quoted() {
        assert_eq!(format!("{}", Attribute::entrypoint()), "\"cudaq-entrypoint\"");
        assert_eq!(format!("{}", Attribute::kernel()), "\"cudaq-kernel\"");
    }

    #[test]
    fn test_bare_and_valued() {
        assert_eq!(format!("{}", Attribute::unit("no_inline")), "no_inline");
        assert_eq!(
            format!("{}", Attribute::with_value("quake.target", "sim")),
            "quake.target = \"sim\""
        );
        assert_eq!(
            format!("{}", Attribute::with_value("note", "say \"hi\"")),
            "note = \"say \\\"hi\\\"\""
        );
    }

    #[test]
    fn test_is_bare_name() {
        assert!(is_bare_name("abc_1.x"));
        assert!(!is_bare_name("1abc"));
        assert!(!is_bare_name("cudaq-entrypoint"));
        assert!(!is_bare_name(""));
    }
}
