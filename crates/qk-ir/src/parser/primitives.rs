//! Primitive parsers for types, values, names, and literals.

use alloc::string::{String, ToString};

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, tag, take_while, take_while1},
    character::complete::{char, satisfy},
    combinator::{map, map_res, opt, recognize, value},
    multi::separated_list1,
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

use super::whitespace::blank;
use crate::{types::Type, value::Value};

fn digits(input: &str) -> IResult<&str, u32> {
    map_res(take_while1(|c: char| c.is_ascii_digit()), |s: &str| {
        s.parse::<u32>()
    })(input)
}

/// Parse a numeric literal token without interpreting it.
///
/// Accepts integers, decimals, exponents and the `NaN`/`inf` spellings that
/// float constants print with.
pub(crate) fn number_token(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        opt(char('-')),
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '.' || c == '+' || c == '-'),
    ))(input)
}

/// Parse a scalar type (i1, i8, i32, i64, f32, f64)
fn parse_scalar_type(input: &str) -> IResult<&str, Type> {
    alt((
        map(tag("i1"), |_| Type::I1),
        map(tag("i8"), |_| Type::I8),
        map(tag("i32"), |_| Type::I32),
        map(tag("i64"), |_| Type::I64),
        map(tag("f32"), |_| Type::F32),
        map(tag("f64"), |_| Type::F64),
    ))(input)
}

/// Parse any type, including `complex<..>`, `!cc.stdvec<..>` and `!cc.struct<{..}>`
pub(crate) fn parse_type(input: &str) -> IResult<&str, Type> {
    alt((
        map(
            delimited(
                terminated(tag("!cc.stdvec<"), blank),
                terminated(parse_type, blank),
                char('>'),
            ),
            Type::stdvec,
        ),
        map(
            delimited(
                terminated(tag("!cc.struct<{"), blank),
                separated_list1(terminated(char(','), blank), terminated(parse_type, blank)),
                tag("}>"),
            ),
            Type::Struct,
        ),
        map(
            delimited(
                terminated(tag("complex<"), blank),
                terminated(parse_type, blank),
                char('>'),
            ),
            Type::complex,
        ),
        parse_scalar_type,
    ))(input)
}

/// Parse a value (%arg0, %0, etc.)
pub(crate) fn parse_value(input: &str) -> IResult<&str, Value> {
    alt((
        map(preceded(tag("%arg"), digits), Value::Param),
        map(preceded(char('%'), digits), Value::Result),
    ))(input)
}

/// Parse a symbol reference (@name)
pub(crate) fn parse_symbol(input: &str) -> IResult<&str, String> {
    map(
        preceded(
            char('@'),
            take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '$'),
        ),
        |s: &str| s.to_string(),
    )(input)
}

/// Parse a bare identifier (attribute names such as `quake.target`)
pub(crate) fn bare_ident(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '$'),
    ))(input)
}

/// Parse a double-quoted string literal, resolving `\"` and `\\` escapes
pub(crate) fn string_literal(input: &str) -> IResult<&str, String> {
    map(
        delimited(
            char('"'),
            opt(escaped_transform(
                is_not("\\\""),
                '\\',
                alt((value("\\", char('\\')), value("\"", char('"')))),
            )),
            char('"'),
        ),
        Option::unwrap_or_default,
    )(input)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn test_parse_scalar_types() {
        assert_eq!(parse_type("i1"), Ok(("", Type::I1)));
        assert_eq!(parse_type("i8"), Ok(("", Type::I8)));
        assert_eq!(parse_type("i32"), Ok(("", Type::I32)));
        assert_eq!(parse_type("i64"), Ok(("", Type::I64)));
        assert_eq!(parse_type("f32"), Ok(("", Type::F32)));
        assert_eq!(parse_type("f64"), Ok(("", Type::F64)));
    }

    #[test]
    fn test_parse_container_types() {
        assert_eq!(
            parse_type("!cc.stdvec<f64>"),
            Ok(("", Type::stdvec(Type::F64)))
        );
        assert_eq!(
            parse_type("!cc.stdvec<!cc.stdvec<i64>>"),
            Ok(("", Type::stdvec(Type::stdvec(Type::I64))))
        );
        assert_eq!(
            parse_type("!cc.struct<{f64, i1}>"),
            Ok(("", Type::Struct(vec![Type::F64, Type::I1])))
        );
        assert_eq!(
            parse_type("complex<f64>"),
            Ok(("", Type::complex(Type::F64)))
        );
        assert!(parse_type("!cc.struct<{}>").is_err());
        assert!(parse_type("vector<f64>").is_err());
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("%arg0"), Ok(("", Value::Param(0))));
        assert_eq!(parse_value("%12 "), Ok((" ", Value::Result(12))));
        assert!(parse_value("%x").is_err());
    }

    #[test]
    fn test_parse_symbol() {
        assert_eq!(
            parse_symbol("@__nvqpp__mlirgen____nvqppBuilderKernel_7("),
            Ok(("(", "__nvqpp__mlirgen____nvqppBuilderKernel_7".to_string()))
        );
        assert!(parse_symbol("@(").is_err());
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(
            string_literal("\"cudaq-entrypoint\""),
            Ok(("", "cudaq-entrypoint".to_string()))
        );
        assert_eq!(string_literal("\"\""), Ok(("", String::new())));
        assert_eq!(
            string_literal(r#""a\"b\\c""#),
            Ok(("", "a\"b\\c".to_string()))
        );
    }

    #[test]
    fn test_number_token() {
        assert_eq!(number_token("-3 : i64"), Ok((" : i64", "-3")));
        assert_eq!(number_token("1.5e-3 :"), Ok((" :", "1.5e-3")));
        assert_eq!(number_token("NaN :"), Ok((" :", "NaN")));
    }

    #[test]
    fn test_bare_ident() {
        assert_eq!(bare_ident("quake.target ="), Ok((" =", "quake.target")));
        assert!(bare_ident("1x").is_err());
    }
}
