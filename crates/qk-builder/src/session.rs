//! Builder sessions.
//!
//! A [`BuilderSession`] owns the module its kernels are emitted into. All
//! mutation goes through `&mut self`, so a session is used from one thread at
//! a time; it is `Send` and may be handed to another thread by move. Many
//! sessions can share one registry concurrently.

use std::sync::Arc;

use log::{debug, warn};
use qk_ir::{Attribute, Function, Module};

use crate::{
    binder::bind,
    config::BuilderConfig,
    descriptor::ParameterType,
    error::BuilderError,
    handle::{ArgumentAccessor, KernelHandle},
    kernel_builder::{BodyCursor, KernelBuilder},
    registry::{KernelId, KernelRegistry},
};

/// Builds kernels into a module and keeps them registered while it lives.
///
/// Dropping the session releases its kernels from the registry.
#[derive(Debug)]
pub struct BuilderSession {
    registry: Arc<KernelRegistry>,
    builder: KernelBuilder,
    module: Module,
    kernels: Vec<KernelHandle>,
}

impl BuilderSession {
    /// Session on the process-wide registry with default settings.
    pub fn new() -> Self {
        Self::with_registry(KernelRegistry::global())
    }

    pub fn with_registry(registry: Arc<KernelRegistry>) -> Self {
        Self::with_config(registry, BuilderConfig::default())
    }

    pub fn with_config(registry: Arc<KernelRegistry>, config: BuilderConfig) -> Self {
        Self {
            registry,
            builder: KernelBuilder::new(config),
            module: Module::new(),
            kernels: Vec::new(),
        }
    }

    pub fn registry(&self) -> &Arc<KernelRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &BuilderConfig {
        self.builder.config()
    }

    /// Build a kernel taking one parameter per requested type.
    ///
    /// Returns the kernel handle and one accessor per parameter, in order.
    /// An empty list builds a kernel with no parameters. If any type has no
    /// encoding, the call fails before an identifier is reserved, so the
    /// registry is left exactly as it was.
    pub fn make_kernel(
        &mut self,
        types: &[ParameterType],
    ) -> Result<(KernelHandle, Vec<ArgumentAccessor>), BuilderError> {
        let arguments = bind(types)?;

        let id = self.registry.reserve();
        let kernel = self
            .builder
            .open_kernel(&mut self.module, &self.registry, id, arguments)?;

        if let Err(err) = self.registry.register(id, kernel.clone()) {
            self.module.remove_function(kernel.symbol());
            return Err(err);
        }
        self.kernels.push(kernel.clone());

        let accessors = kernel
            .arguments()
            .iter()
            .cloned()
            .map(|argument| ArgumentAccessor::new(id, argument))
            .collect();
        Ok((kernel, accessors))
    }

    /// Handles from other sessions are unknown here, even when this session
    /// shares their registry.
    fn owned(&self, kernel: &KernelHandle) -> Result<(), BuilderError> {
        if self.kernels.contains(kernel) {
            Ok(())
        } else {
            Err(BuilderError::UnknownKernel { id: kernel.id() })
        }
    }

    /// Cursor for appending operations to an open kernel's body.
    pub fn body(&mut self, kernel: &KernelHandle) -> Result<BodyCursor<'_>, BuilderError> {
        self.owned(kernel)?;
        self.builder.cursor(&mut self.module, kernel)
    }

    /// Verify a kernel and make it immutable. Repeated calls succeed and
    /// change nothing.
    pub fn finalize(&mut self, kernel: &KernelHandle) -> Result<(), BuilderError> {
        self.owned(kernel)?;
        self.builder.finalize(&self.module, kernel)
    }

    /// Finalize every kernel in this session.
    pub fn finalize_all(&mut self) -> Result<(), BuilderError> {
        for kernel in &self.kernels {
            self.builder.finalize(&self.module, kernel)?;
        }
        Ok(())
    }

    /// Look up a live kernel in this session's registry.
    pub fn lookup(&self, id: KernelId) -> Result<KernelHandle, BuilderError> {
        self.registry.lookup(id)
    }

    /// Kernels built by this session, in creation order.
    pub fn kernels(&self) -> &[KernelHandle] {
        &self.kernels
    }

    /// The emitted function for a kernel of this session.
    pub fn function(&self, kernel: &KernelHandle) -> Result<&Function, BuilderError> {
        self.owned(kernel)?;
        self.module
            .get_function(kernel.symbol())
            .ok_or(BuilderError::UnknownKernel { id: kernel.id() })
    }

    /// Textual IR of one kernel.
    ///
    /// A kernel that is still open prints its current body and is sealed: it
    /// can no longer be modified, as if finalized. The module itself is not
    /// touched, and output is identical for identical kernels.
    pub fn print(&self, kernel: &KernelHandle) -> Result<String, BuilderError> {
        let text = self.function(kernel)?.to_string();
        seal(kernel);
        Ok(text)
    }

    /// Textual IR of the whole module. Seals every kernel of the session.
    pub fn print_module(&self) -> String {
        let text = self.module.to_string();
        self.kernels.iter().for_each(seal);
        text
    }

    /// Set a module-level attribute, replacing one with the same name.
    pub fn set_module_attribute(&mut self, attr: Attribute) {
        self.module.set_attribute(attr);
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    /// Finalize all kernels and hand back the module. The kernels are
    /// released from the registry.
    pub fn into_module(mut self) -> Result<Module, BuilderError> {
        self.finalize_all()?;
        Ok(std::mem::take(&mut self.module))
    }
}

fn seal(kernel: &KernelHandle) {
    if kernel.mark_finalized() {
        debug!("kernel @{} sealed by printing", kernel.symbol());
    }
}

impl Default for BuilderSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BuilderSession {
    fn drop(&mut self) {
        for kernel in self.kernels.drain(..) {
            if !kernel.is_finalized() {
                warn!("dropping kernel @{} before it was finalized", kernel.symbol());
            }
            self.registry.release(kernel.id());
        }
        debug!("builder session on `{}` torn down", self.registry.namespace());
    }
}

/// Build a kernel on the process-wide registry.
///
/// Convenience for one-off kernels: the session that owns the kernel is
/// returned with it and must be kept alive for as long as the kernel is used.
pub fn make_kernel(
    types: &[ParameterType],
) -> Result<(BuilderSession, KernelHandle, Vec<ArgumentAccessor>), BuilderError> {
    let mut session = BuilderSession::new();
    let (kernel, arguments) = session.make_kernel(types)?;
    Ok((session, kernel, arguments))
}
