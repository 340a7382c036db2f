//! Parse error types.

use alloc::string::{String, ToString};
use core::fmt;

/// Parse error with position information.
///
/// `position` is a byte offset into the parsed text; `line` and `column` are
/// 1-based and derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub position: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parse error at {}:{}: {}",
            self.line, self.column, self.message
        )
    }
}

impl core::error::Error for ParseError {}

/// Build an error pointing at the start of `remaining_input` within `original_input`.
pub(crate) fn parse_error(original_input: &str, remaining_input: &str, message: &str) -> ParseError {
    let position = original_input.len() - remaining_input.len();
    let consumed = &original_input[..position];
    let line = consumed.matches('\n').count() + 1;
    let column = match consumed.rfind('\n') {
        Some(nl) => position - nl,
        None => position + 1,
    };
    ParseError {
        message: message.to_string(),
        position,
        line,
        column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_and_column() {
        let input = "module {\n  bogus\n}";
        let err = parse_error(input, &input[11..], "unexpected");
        assert_eq!(err.position, 11);
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 3);
    }

    #[test]
    fn test_first_line() {
        let err = parse_error("abc", "c", "x");
        assert_eq!((err.line, err.column), (1, 3));
    }
}
