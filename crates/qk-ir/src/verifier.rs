//! IR verifier.

use alloc::{collections::BTreeSet, format, string::String, vec::Vec};
use core::fmt;

use crate::{function::Function, inst::Inst, module::Module, value::Value};

/// Verifier error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierError {
    /// Error message describing what's wrong
    pub message: String,
    /// Optional location information (e.g., "@kernel", "inst2")
    pub location: Option<String>,
}

impl VerifierError {
    /// Create a new verifier error
    pub fn new(message: String) -> Self {
        Self {
            message,
            location: None,
        }
    }

    /// Create a new verifier error with location
    pub fn with_location(message: String, location: String) -> Self {
        Self {
            message,
            location: Some(location),
        }
    }
}

impl fmt::Display for VerifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}", location, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl core::error::Error for VerifierError {}

/// Verify a function is well-formed.
///
/// Checks that:
/// - the body ends with exactly one `return`, and it is the last instruction
/// - results are numbered densely from zero, in order
/// - every operand is a parameter or an earlier result
/// - `cc.stdvec_size` operands are dynamic vectors of the recorded type
/// - integer constants fit their type
pub fn verify(function: &Function) -> Result<(), Vec<VerifierError>> {
    let mut errors = Vec::new();

    verify_terminator(function, &mut errors);
    verify_values(function, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Verify every function in a module.
pub fn verify_module(module: &Module) -> Result<(), Vec<VerifierError>> {
    let mut errors = Vec::new();
    for func in module.functions.values() {
        if let Err(func_errors) = verify(func) {
            errors.extend(func_errors);
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn verify_terminator(function: &Function, errors: &mut Vec<VerifierError>) {
    let insts = &function.body.insts;
    let location = format!("@{}", function.name);

    if function.body.terminator().is_none() {
        errors.push(VerifierError::with_location(
            String::from("body does not end with a return"),
            location.clone(),
        ));
    }

    let last = insts.len().saturating_sub(1);
    for (i, inst) in insts.iter().enumerate() {
        if inst.is_terminator() && i != last {
            errors.push(VerifierError::with_location(
                String::from("return must be the last instruction"),
                format!("{} inst{}", location, i),
            ));
        }
    }
}

fn verify_values(function: &Function, errors: &mut Vec<VerifierError>) {
    let mut defined = BTreeSet::new();
    let mut expected_result = 0u32;

    for (i, inst) in function.body.insts.iter().enumerate() {
        let location = format!("@{} inst{}", function.name, i);

        for arg in inst.args() {
            let known = match arg {
                Value::Param(p) => (p as usize) < function.param_count(),
                Value::Result(_) => defined.contains(&arg),
            };
            if !known {
                errors.push(VerifierError::with_location(
                    format!("use of undefined value {}", arg),
                    location.clone(),
                ));
            }
        }

        if let Inst::ConstInt { value, ty, .. } = inst {
            if !ty.fits_int(*value) {
                errors.push(VerifierError::with_location(
                    format!("constant {} does not fit in {}", value, ty),
                    location.clone(),
                ));
            }
        }

        if let Inst::StdvecSize {
            vector, vector_ty, ..
        } = inst
        {
            if !vector_ty.is_stdvec() {
                errors.push(VerifierError::with_location(
                    format!("cc.stdvec_size operand type {} is not a vector", vector_ty),
                    location.clone(),
                ));
            } else if let Some(actual) = operand_type(function, i, *vector) {
                if &actual != vector_ty {
                    errors.push(VerifierError::with_location(
                        format!(
                            "cc.stdvec_size operand {} has type {}, expected {}",
                            vector, actual, vector_ty
                        ),
                        location.clone(),
                    ));
                }
            }
        }

        if let Some(result) = inst.result() {
            match result {
                Value::Result(n) if n == expected_result => {
                    expected_result += 1;
                    defined.insert(result);
                }
                _ => errors.push(VerifierError::with_location(
                    format!("expected result %{}, found {}", expected_result, result),
                    location,
                )),
            }
        }
    }
}

/// Type of `value` as seen by the instruction at `at`.
fn operand_type(function: &Function, at: usize, value: Value) -> Option<crate::Type> {
    match value {
        Value::Param(p) => function.signature.param(p as usize).cloned(),
        Value::Result(_) => function.body.insts[..at]
            .iter()
            .find(|inst| inst.result() == Some(value))
            .and_then(Inst::result_type),
    }
}
