//! Handles to kernels and their arguments.

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use qk_ir::{Type, Value};

use crate::{binder::KernelArgument, descriptor::ParameterType, registry::KernelId};

#[derive(Debug)]
struct KernelInfo {
    id: KernelId,
    name: String,
    symbol: String,
    arguments: Vec<KernelArgument>,
    finalized: AtomicBool,
}

/// A kernel built by a [`crate::BuilderSession`].
///
/// Clones share state: finalizing through one clone is visible through all of
/// them, including the copy held by the registry. Two handles are equal only
/// if they are clones of the same kernel.
#[derive(Debug, Clone)]
pub struct KernelHandle {
    inner: Arc<KernelInfo>,
}

impl KernelHandle {
    pub(crate) fn new(
        id: KernelId,
        name: String,
        symbol: String,
        arguments: Vec<KernelArgument>,
    ) -> Self {
        Self {
            inner: Arc::new(KernelInfo {
                id,
                name,
                symbol,
                arguments,
                finalized: AtomicBool::new(false),
            }),
        }
    }

    pub fn id(&self) -> KernelId {
        self.inner.id
    }

    /// Kernel name, `{namespace}_{id}`.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Function symbol the kernel is printed under.
    pub fn symbol(&self) -> &str {
        &self.inner.symbol
    }

    pub fn arguments(&self) -> &[KernelArgument] {
        &self.inner.arguments
    }

    pub fn argument_count(&self) -> usize {
        self.inner.arguments.len()
    }

    pub fn is_finalized(&self) -> bool {
        self.inner.finalized.load(Ordering::Acquire)
    }

    /// Returns true if this call finalized the kernel.
    pub(crate) fn mark_finalized(&self) -> bool {
        !self.inner.finalized.swap(true, Ordering::AcqRel)
    }
}

impl PartialEq for KernelHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for KernelHandle {}

impl fmt::Display for KernelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.inner.symbol)
    }
}

/// Caller-facing view of one kernel argument, used to refer to it when
/// adding body operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentAccessor {
    kernel: KernelId,
    argument: KernelArgument,
}

impl ArgumentAccessor {
    pub(crate) fn new(kernel: KernelId, argument: KernelArgument) -> Self {
        Self { kernel, argument }
    }

    /// Kernel this argument belongs to.
    pub fn kernel(&self) -> KernelId {
        self.kernel
    }

    pub fn name(&self) -> &str {
        &self.argument.name
    }

    pub fn position(&self) -> usize {
        self.argument.position
    }

    pub fn parameter_type(&self) -> &ParameterType {
        &self.argument.ty
    }

    pub fn ir_type(&self) -> &Type {
        &self.argument.ir_type
    }

    /// Operand naming this argument in body instructions.
    pub fn value(&self) -> Value {
        self.argument.value()
    }
}
