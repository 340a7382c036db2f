//! Whitespace and comment skipping.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till},
    character::complete::multispace1,
    combinator::{map, recognize},
    multi::many0,
    sequence::pair,
    IResult,
};

/// Parse a `//` comment up to (not including) the end of the line.
fn line_comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("//"), take_till(|c| c == '\n')))(input)
}

/// Any run of whitespace and `//` comments, possibly empty.
pub(crate) fn blank_space(input: &str) -> IResult<&str, &str> {
    recognize(many0(alt((multispace1, line_comment))))(input)
}

/// Skip whitespace and comments between tokens.
pub(crate) fn blank(input: &str) -> IResult<&str, ()> {
    map(blank_space, |_| ())(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_space() {
        assert_eq!(blank_space("   "), Ok(("", "   ")));
        assert_eq!(blank_space("\n\t  "), Ok(("", "\n\t  ")));
        assert_eq!(blank_space("  %0"), Ok(("%0", "  ")));
        assert_eq!(blank_space(""), Ok(("", "")));
    }

    #[test]
    fn test_blank_skips_comments() {
        assert_eq!(blank("// note\n  return"), Ok(("return", ())));
        assert_eq!(blank("  // a\n// b\nx"), Ok(("x", ())));
        assert_eq!(blank("// trailing"), Ok(("", ())));
    }
}
