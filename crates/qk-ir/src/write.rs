//! Textual form of the IR.
//!
//! The printed text is consumed by pattern-matching verification tools, so the
//! keywords, attribute names and type spellings produced here are stable:
//!
//! ```text
//! module {
//!   func.func @__nvqpp__mlirgen____nvqppBuilderKernel_0(%arg0: !cc.stdvec<f64>) attributes {"cudaq-entrypoint", "cudaq-kernel"} {
//!     %0 = cc.stdvec_size %arg0 : (!cc.stdvec<f64>) -> i64
//!     return
//!   }
//! }
//! ```
//!
//! Output depends only on the input, never on allocation order or hashing.

use core::fmt::{self, Write};

use crate::{attribute::Attribute, function::Function, inst::Inst, module::Module};

const INDENT: &str = "  ";

fn write_indent(w: &mut dyn Write, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        w.write_str(INDENT)?;
    }
    Ok(())
}

fn write_attr_dict(w: &mut dyn Write, attrs: &[Attribute]) -> fmt::Result {
    write!(w, "{{")?;
    for (i, attr) in attrs.iter().enumerate() {
        if i > 0 {
            write!(w, ", ")?;
        }
        write!(w, "{}", attr)?;
    }
    write!(w, "}}")
}

/// Write a function at the given indentation depth.
pub fn write_function(w: &mut dyn Write, func: &Function, depth: usize) -> fmt::Result {
    write_indent(w, depth)?;
    write!(w, "func.func @{}(", func.name)?;
    for (i, ty) in func.signature.params.iter().enumerate() {
        if i > 0 {
            write!(w, ", ")?;
        }
        write!(w, "%arg{}: {}", i, ty)?;
    }
    write!(w, ")")?;

    if !func.attributes.is_empty() {
        write!(w, " attributes ")?;
        write_attr_dict(w, &func.attributes)?;
    }
    writeln!(w, " {{")?;

    for inst in &func.body.insts {
        write_indent(w, depth + 1)?;
        write_inst(w, inst)?;
        writeln!(w)?;
    }

    write_indent(w, depth)?;
    writeln!(w, "}}")
}

/// Write a single instruction, without indentation or newline.
pub fn write_inst(w: &mut dyn Write, inst: &Inst) -> fmt::Result {
    match inst {
        Inst::ConstInt { result, value, ty } => {
            write!(w, "{} = arith.constant {} : {}", result, value, ty)
        }
        Inst::ConstFloat {
            result,
            value_bits,
            ty,
        } => write!(
            w,
            "{} = arith.constant {:?} : {}",
            result,
            f64::from_bits(*value_bits),
            ty
        ),
        Inst::StdvecSize {
            result,
            vector,
            vector_ty,
        } => write!(
            w,
            "{} = cc.stdvec_size {} : ({}) -> i64",
            result, vector, vector_ty
        ),
        Inst::Return => write!(w, "return"),
    }
}

/// Write a module and all of its functions.
pub fn write_module(w: &mut dyn Write, module: &Module) -> fmt::Result {
    write!(w, "module")?;
    if !module.attributes.is_empty() {
        write!(w, " attributes ")?;
        write_attr_dict(w, &module.attributes)?;
    }
    writeln!(w, " {{")?;

    for (i, func) in module.functions.values().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        write_function(w, func, 1)?;
    }

    writeln!(w, "}}")
}
