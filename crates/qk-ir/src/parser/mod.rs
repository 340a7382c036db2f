//! Parser for the printed IR text.
//!
//! Accepts exactly what [`crate::write`] produces, plus `//` comments and
//! free whitespace between tokens, so printed kernels can be read back and
//! checked structurally.

mod attributes;
mod error;
mod function;
mod instructions;
mod module;
mod primitives;
mod whitespace;

use error::parse_error;
pub use error::ParseError;
use function::parse_function_internal;
use module::parse_module_internal;
use nom::IResult;

use crate::{function::Function, module::Module, types::Type};

/// Run `parser` over the whole of `input`, rejecting trailing text.
fn parse_complete<'a, T>(
    input: &'a str,
    what: &str,
    parser: impl FnOnce(&'a str) -> IResult<&'a str, T>,
) -> Result<T, ParseError> {
    // Leading/trailing whitespace is not significant
    let trimmed = input.trim();
    let start = whitespace::blank(trimmed)
        .map(|(rest, _)| rest)
        .unwrap_or(trimmed);
    match parser(start) {
        Ok((remaining, parsed)) => {
            if remaining.trim().is_empty() {
                Ok(parsed)
            } else {
                Err(parse_error(
                    trimmed,
                    remaining,
                    &alloc::format!("unexpected input after {}", what),
                ))
            }
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(parse_error(
            trimmed,
            e.input,
            &alloc::format!("invalid {} ({:?})", what, e.code),
        )),
        Err(nom::Err::Incomplete(_)) => Err(parse_error(
            trimmed,
            "",
            &alloc::format!("incomplete {}", what),
        )),
    }
}

/// Parse a complete module from IR text.
pub fn parse_module(input: &str) -> Result<Module, ParseError> {
    parse_complete(input, "module", parse_module_internal)
}

/// Parse a function from IR text.
pub fn parse_function(input: &str) -> Result<Function, ParseError> {
    parse_complete(input, "function", parse_function_internal)
}

/// Parse a type spelling such as `!cc.stdvec<f64>`.
pub fn parse_type(input: &str) -> Result<Type, ParseError> {
    parse_complete(input, "type", primitives::parse_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_module_empty() {
        // Test that empty input fails
        let result = parse_module("");
        assert!(result.is_err(), "Should fail on empty input");
    }

    #[test]
    fn test_parse_module_invalid_syntax() {
        let result = parse_module("invalid");
        assert!(result.is_err(), "Should fail on invalid syntax");
    }

    #[test]
    fn test_parse_module_missing_brace() {
        let result = parse_module("module {");
        assert!(result.is_err(), "Should fail on missing closing brace");
    }

    #[test]
    fn test_parse_function_missing_brace() {
        let result = parse_function("func.func @k() {");
        assert!(result.is_err(), "Should fail on missing closing brace");
    }

    #[test]
    fn test_parse_function_unexpected_remaining() {
        let err = parse_function("func.func @k() {\n  return\n} extra").unwrap_err();
        assert!(err.message.contains("unexpected input after function"));
        assert_eq!(err.line, 3);
    }

    #[test]
    fn test_parse_function_with_comments() {
        let input = r#"// builder output
        func.func @k(%arg0: !cc.stdvec<f64>) {
            // size of the input
            %0 = cc.stdvec_size %arg0 : (!cc.stdvec<f64>) -> i64 // inline
            return
        }"#;
        let func = parse_function(input).expect("parse_function with comments failed");
        assert_eq!(func.body.inst_count(), 2);
    }

    #[test]
    fn test_parse_type() {
        assert_eq!(parse_type(" !cc.stdvec<f64> "), Ok(Type::stdvec(Type::F64)));
        assert!(parse_type("!cc.stdvec<f64> x").is_err());
    }
}
