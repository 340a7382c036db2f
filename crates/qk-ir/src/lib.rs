//! Kernel Intermediate Representation (IR).
//!
//! This crate defines the IR that kernel builders emit:
//! - Types (f64, i64, `!cc.stdvec<f64>`, etc.)
//! - Values (kernel parameters and instruction results)
//! - Instructions (constants, vector size, return)
//! - Functions (symbol, signature, attributes and a body block)
//! - Modules (the compilation unit holding kernels)
//!
//! The textual form written by [`write`] is stable and can be read back with
//! [`parse_module`] / [`parse_function`].

#![no_std]

extern crate alloc;

mod attribute;
mod block;
mod function;
mod inst;
mod module;
mod parser;
mod signature;
mod types;
mod value;
mod verifier;
pub mod write;

pub use attribute::{Attribute, ENTRYPOINT_ATTR, KERNEL_ATTR};
pub use block::Block;
pub use function::Function;
pub use inst::Inst;
pub use module::Module;
pub use parser::{parse_function, parse_module, parse_type, ParseError};
pub use signature::Signature;
pub use types::Type;
pub use value::Value;
pub use verifier::{verify, verify_module, VerifierError};
