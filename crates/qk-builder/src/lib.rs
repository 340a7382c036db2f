//! Dynamic kernel builder.
//!
//! Builds quantum kernels at runtime from a list of parameter types and emits
//! them as textual IR:
//!
//! ```
//! use qk_builder::{BuilderSession, ParameterType};
//!
//! let mut session = BuilderSession::new();
//! let (kernel, args) = session.make_kernel(&[ParameterType::list()]).unwrap();
//! session.body(&kernel).unwrap().stdvec_size(args[0].value()).unwrap();
//! session.finalize(&kernel).unwrap();
//!
//! let text = session.print(&kernel).unwrap();
//! assert!(text.contains("%arg0: !cc.stdvec<f64>"));
//! ```

pub mod binder;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod handle;
pub mod kernel_builder;
pub mod registry;
pub mod session;

pub use binder::{bind, KernelArgument};
pub use config::{BuilderConfig, DEFAULT_NAMESPACE, DEFAULT_SYMBOL_PREFIX};
pub use descriptor::{encode, ParameterType, ScalarKind};
pub use error::BuilderError;
pub use handle::{ArgumentAccessor, KernelHandle};
pub use kernel_builder::{BodyCursor, KernelBuilder};
pub use registry::{KernelId, KernelRegistry};
pub use session::{make_kernel, BuilderSession};
