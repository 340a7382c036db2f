//! Module parser.

use nom::{
    bytes::complete::tag,
    character::complete::char,
    combinator::opt,
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{preceded, terminated},
    IResult,
};

use super::{attributes::parse_attr_dict, function::parse_function_internal, whitespace::blank};
use crate::module::Module;

/// Parse a module (internal)
pub(crate) fn parse_module_internal(input: &str) -> IResult<&str, Module> {
    let (input, _) = terminated(tag("module"), blank)(input)?;
    let (input, attributes) = opt(preceded(
        terminated(tag("attributes"), blank),
        terminated(parse_attr_dict, blank),
    ))(input)?;
    let (input, _) = terminated(char('{'), blank)(input)?;

    let functions_start = input;
    let (input, functions) = many0(parse_function_internal)(input)?;

    let (input, _) = terminated(char('}'), blank)(input)?;

    let mut module = Module::new();
    for attr in attributes.unwrap_or_default() {
        module.set_attribute(attr);
    }
    for func in functions {
        // Symbol names are unique within a module
        if module.add_function(func).is_err() {
            return Err(nom::Err::Failure(Error::new(
                functions_start,
                ErrorKind::Verify,
            )));
        }
    }

    Ok((input, module))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;

    #[test]
    fn test_parse_module_internal() {
        let input = r#"module attributes {quake.target = "sim"} {
          func.func @a(%arg0: f64) attributes {"cudaq-entrypoint"} {
            return
          }

          func.func @b() {
            return
          }
        }"#;
        let result = parse_module_internal(input.trim());
        assert!(result.is_ok(), "parse_module_internal failed: {:?}", result);
        let (remaining, module) = result.unwrap();
        assert_eq!(remaining, "", "Should consume all input");
        assert_eq!(module.function_count(), 2);
        assert_eq!(module.entry_points().count(), 1);
        assert_eq!(
            module.attributes,
            [Attribute::with_value("quake.target", "sim")]
        );
    }

    #[test]
    fn test_parse_empty_module() {
        let (_, module) = parse_module_internal("module {\n}").unwrap();
        assert_eq!(module.function_count(), 0);
    }

    #[test]
    fn test_parse_module_duplicate_symbol() {
        let input = "module {\n func.func @a() {\n return\n }\n func.func @a() {\n return\n }\n}";
        assert!(matches!(
            parse_module_internal(input),
            Err(nom::Err::Failure(_))
        ));
    }
}
