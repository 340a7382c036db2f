//! Builder configuration.

/// Namespace used for kernel names by the process-wide registry.
pub const DEFAULT_NAMESPACE: &str = "__nvqppBuilderKernel";

/// Prefix put in front of every kernel name to form its symbol, unless the
/// registry was created with another one.
pub const DEFAULT_SYMBOL_PREFIX: &str = "__nvqpp__mlirgen__";

/// Settings for how a [`crate::BuilderSession`] emits kernels.
///
/// Symbol naming is not configured here: the symbol prefix belongs to the
/// [`crate::KernelRegistry`], which claims it together with its namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Also tag kernels with `cudaq-kernel` next to `cudaq-entrypoint`.
    pub emit_kernel_attr: bool,
}

impl BuilderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kernel_attr(mut self, emit: bool) -> Self {
        self.emit_kernel_attr = emit;
        self
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            emit_kernel_attr: true,
        }
    }
}
