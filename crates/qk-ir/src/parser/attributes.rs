//! Attribute dictionary parser.

use alloc::{string::ToString, vec::Vec};

use nom::{
    branch::alt,
    character::complete::char,
    combinator::{map, opt},
    multi::separated_list0,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};

use super::{
    primitives::{bare_ident, string_literal},
    whitespace::blank,
};
use crate::attribute::Attribute;

/// Parse one attribute: `name`, `"quoted-name"`, or either followed by `= "value"`
pub(crate) fn parse_attribute(input: &str) -> IResult<&str, Attribute> {
    let (input, name) = alt((string_literal, map(bare_ident, |s: &str| s.to_string())))(input)?;
    let (input, value) = opt(preceded(
        tuple((blank, char('='), blank)),
        string_literal,
    ))(input)?;
    Ok((input, Attribute { name, value }))
}

/// Parse an attribute dictionary: `{"cudaq-entrypoint", quake.target = "sim"}`
pub(crate) fn parse_attr_dict(input: &str) -> IResult<&str, Vec<Attribute>> {
    delimited(
        terminated(char('{'), blank),
        separated_list0(
            terminated(char(','), blank),
            terminated(parse_attribute, blank),
        ),
        char('}'),
    )(input)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn test_parse_attribute() {
        assert_eq!(
            parse_attribute("\"cudaq-entrypoint\""),
            Ok(("", Attribute::entrypoint()))
        );
        assert_eq!(
            parse_attribute("quake.target = \"sim\""),
            Ok(("", Attribute::with_value("quake.target", "sim")))
        );
    }

    #[test]
    fn test_parse_attr_dict() {
        assert_eq!(
            parse_attr_dict("{\"cudaq-entrypoint\", \"cudaq-kernel\"}"),
            Ok(("", vec![Attribute::entrypoint(), Attribute::kernel()]))
        );
        assert_eq!(parse_attr_dict("{}"), Ok(("", vec![])));
        assert!(parse_attr_dict("{\"a\"").is_err());
    }
}
