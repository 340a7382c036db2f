//! Function and signature parsers.

use alloc::vec::Vec;

use nom::{
    bytes::complete::tag,
    character::complete::char,
    combinator::{map, opt, verify},
    multi::{many0, separated_list0},
    sequence::{delimited, preceded, separated_pair, terminated},
    IResult,
};

use super::{
    attributes::parse_attr_dict,
    instructions::parse_instruction,
    primitives::{parse_symbol, parse_type, parse_value},
    whitespace::blank,
};
use crate::{block::Block, function::Function, signature::Signature, types::Type, value::Value};

/// Parse a single parameter: %arg0: !cc.stdvec<f64>
fn parse_param(input: &str) -> IResult<&str, (u32, Type)> {
    map(
        separated_pair(
            verify(terminated(parse_value, blank), Value::is_param),
            terminated(char(':'), blank),
            parse_type,
        ),
        |(value, ty)| (value.index(), ty),
    )(input)
}

/// Parse a parameter list: (%arg0: f64, %arg1: i64)
///
/// Parameters must be numbered by position.
pub(crate) fn parse_signature(input: &str) -> IResult<&str, Signature> {
    map(
        verify(
            delimited(
                terminated(char('('), blank),
                separated_list0(terminated(char(','), blank), terminated(parse_param, blank)),
                char(')'),
            ),
            |params: &Vec<(u32, Type)>| {
                params
                    .iter()
                    .enumerate()
                    .all(|(i, (index, _))| *index as usize == i)
            },
        ),
        |params| Signature::new(params.into_iter().map(|(_, ty)| ty).collect()),
    )(input)
}

/// Parse a function (internal, used by module parser)
/// The module parser handles leading whitespace before calling this
pub(crate) fn parse_function_internal(input: &str) -> IResult<&str, Function> {
    let (input, _) = terminated(tag("func.func"), blank)(input)?;
    let (input, name) = terminated(parse_symbol, blank)(input)?;
    let (input, signature) = terminated(parse_signature, blank)(input)?;
    let (input, attributes) = opt(preceded(
        terminated(tag("attributes"), blank),
        terminated(parse_attr_dict, blank),
    ))(input)?;
    let (input, _) = terminated(char('{'), blank)(input)?;

    let (input, insts) = many0(terminated(parse_instruction, blank))(input)?;

    // Allow whitespace after closing brace
    let (input, _) = terminated(char('}'), blank)(input)?;

    Ok((
        input,
        Function {
            name,
            signature,
            attributes: attributes.unwrap_or_default(),
            body: Block { insts },
        },
    ))
}
