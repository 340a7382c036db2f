//! Instruction parsers.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{map, map_res},
    sequence::{delimited, terminated, tuple},
    IResult,
};

use super::{
    primitives::{number_token, parse_type, parse_value},
    whitespace::blank,
};
use crate::{inst::Inst, types::Type, value::Value};

/// Parse the `%N =` prefix of a value-producing instruction.
fn parse_result(input: &str) -> IResult<&str, Value> {
    terminated(terminated(parse_value, blank), terminated(char('='), blank))(input)
}

/// Interpret a numeric literal according to the constant's type.
fn make_constant(result: Value, literal: &str, ty: Type) -> Result<Inst, &'static str> {
    if ty.is_float() {
        let value = literal.parse::<f64>().map_err(|_| "invalid float literal")?;
        Ok(Inst::const_float(result, value, ty))
    } else if ty.is_integer() {
        let value = literal.parse::<i64>().map_err(|_| "invalid integer literal")?;
        Ok(Inst::ConstInt { result, value, ty })
    } else {
        Err("constants must have a scalar type")
    }
}

/// `%0 = arith.constant 42 : i64`
fn parse_constant(input: &str) -> IResult<&str, Inst> {
    map_res(
        tuple((
            parse_result,
            terminated(tag("arith.constant"), blank),
            terminated(number_token, blank),
            terminated(char(':'), blank),
            parse_type,
        )),
        |(result, _, literal, _, ty)| make_constant(result, literal, ty),
    )(input)
}

/// `%1 = cc.stdvec_size %arg0 : (!cc.stdvec<f64>) -> i64`
fn parse_stdvec_size(input: &str) -> IResult<&str, Inst> {
    map(
        tuple((
            parse_result,
            terminated(tag("cc.stdvec_size"), blank),
            terminated(parse_value, blank),
            terminated(char(':'), blank),
            delimited(
                terminated(char('('), blank),
                terminated(parse_type, blank),
                terminated(char(')'), blank),
            ),
            terminated(tag("->"), blank),
            tag("i64"),
        )),
        |(result, _, vector, _, vector_ty, _, _)| Inst::StdvecSize {
            result,
            vector,
            vector_ty,
        },
    )(input)
}

fn parse_return(input: &str) -> IResult<&str, Inst> {
    map(tag("return"), |_| Inst::Return)(input)
}

/// Parse a single instruction
pub(crate) fn parse_instruction(input: &str) -> IResult<&str, Inst> {
    alt((parse_return, parse_constant, parse_stdvec_size))(input)
}
