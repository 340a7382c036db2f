//! File-based tests for kernel IR.
//!
//! Each `.qkir` file starts with a test command and holds a series of cases:
//! - `test cat`: parse a function, print it, compare with the `;` lines after it
//! - `test verifier`: parse a function and check the verifier against
//!   `// error:` annotations inside it
//! - `test kernel`: build a kernel from a `kernel(...)` header and run the
//!   `;` filecheck directives after it against the printed output

pub mod filecheck;
pub mod parser;

mod test_cat;
mod test_kernel;
mod test_verifier;

pub use filecheck::{build_filechecker, match_filecheck};
pub use parser::{normalize_ir, parse_test_file, TestCase};
