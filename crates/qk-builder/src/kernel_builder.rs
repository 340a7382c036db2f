//! Kernel construction inside a module.

use log::{debug, trace};
use qk_ir::{Attribute, Block, Function, Inst, Module, Signature, Type, Value};

use crate::{
    binder::KernelArgument,
    config::BuilderConfig,
    error::BuilderError,
    handle::KernelHandle,
    registry::{KernelId, KernelRegistry},
};

/// Creates and finalizes kernel functions in a [`Module`].
#[derive(Debug, Clone, Default)]
pub struct KernelBuilder {
    config: BuilderConfig,
}

impl KernelBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Add an empty kernel for the reserved `id` to `module`, named and
    /// symbolized by `registry`.
    ///
    /// The kernel gets one parameter per argument in order, the entry-point
    /// attribute, and a body holding only `return`.
    pub fn open_kernel(
        &self,
        module: &mut Module,
        registry: &KernelRegistry,
        id: KernelId,
        arguments: Vec<KernelArgument>,
    ) -> Result<KernelHandle, BuilderError> {
        let name = registry.kernel_name(id);
        let symbol = registry.symbol_for(id);
        let signature = Signature::new(arguments.iter().map(|a| a.ir_type.clone()).collect());

        let mut function = Function::new(symbol.clone(), signature);
        function.add_attribute(Attribute::entrypoint());
        if self.config.emit_kernel_attr {
            function.add_attribute(Attribute::kernel());
        }
        function.body = Block::with_return();

        if module.add_function(function).is_err() {
            return Err(BuilderError::DuplicateKernel { id });
        }
        debug!(
            "opened kernel @{} with {} argument(s)",
            symbol,
            arguments.len()
        );
        Ok(KernelHandle::new(id, name, symbol, arguments))
    }

    /// Verify the kernel body and mark it immutable.
    ///
    /// Finalizing an already finalized kernel does nothing. A kernel that fails
    /// verification stays open.
    pub fn finalize(&self, module: &Module, kernel: &KernelHandle) -> Result<(), BuilderError> {
        if kernel.is_finalized() {
            return Ok(());
        }
        let function = module
            .get_function(kernel.symbol())
            .ok_or(BuilderError::UnknownKernel { id: kernel.id() })?;
        qk_ir::verify(function).map_err(|errors| BuilderError::Verifier {
            kernel: kernel.name().to_string(),
            errors,
        })?;
        if kernel.mark_finalized() {
            debug!("finalized kernel @{}", kernel.symbol());
        }
        Ok(())
    }

    /// Cursor appending to the body of an open kernel.
    pub fn cursor<'m>(
        &self,
        module: &'m mut Module,
        kernel: &KernelHandle,
    ) -> Result<BodyCursor<'m>, BuilderError> {
        if kernel.is_finalized() {
            return Err(BuilderError::KernelFinalized {
                kernel: kernel.name().to_string(),
            });
        }
        let function = module
            .get_function_mut(kernel.symbol())
            .ok_or(BuilderError::UnknownKernel { id: kernel.id() })?;
        Ok(BodyCursor { function })
    }
}

/// Appends instructions to a kernel body, ahead of its `return`.
///
/// Each append returns the value it defines, so later instructions can use it.
#[derive(Debug)]
pub struct BodyCursor<'m> {
    function: &'m mut Function,
}

impl BodyCursor<'_> {
    fn next_value(&self) -> Value {
        Value::Result(self.function.next_result_index())
    }

    fn append(&mut self, inst: Inst) {
        trace!("@{}: appending {:?}", self.function.name(), inst);
        self.function.body.insert_before_terminator(inst);
    }

    /// `arith.constant` of an integer type. The value must fit the type;
    /// `i1` takes `0` or `1`.
    pub fn const_int(&mut self, value: i64, ty: Type) -> Result<Value, BuilderError> {
        if !ty.is_integer() {
            return Err(BuilderError::InvalidConstantType { ty });
        }
        if !ty.fits_int(value) {
            return Err(BuilderError::InvalidConstantValue { value, ty });
        }
        let result = self.next_value();
        self.append(Inst::ConstInt { result, value, ty });
        Ok(result)
    }

    pub fn const_i64(&mut self, value: i64) -> Result<Value, BuilderError> {
        self.const_int(value, Type::I64)
    }

    /// `arith.constant` of a float type.
    pub fn const_float(&mut self, value: f64, ty: Type) -> Result<Value, BuilderError> {
        if !ty.is_float() {
            return Err(BuilderError::InvalidConstantType { ty });
        }
        let result = self.next_value();
        self.append(Inst::const_float(result, value, ty));
        Ok(result)
    }

    pub fn const_f64(&mut self, value: f64) -> Result<Value, BuilderError> {
        self.const_float(value, Type::F64)
    }

    /// `cc.stdvec_size`: the runtime length of a dynamic sequence, as `i64`.
    pub fn stdvec_size(&mut self, vector: Value) -> Result<Value, BuilderError> {
        let vector_ty = self
            .function
            .value_type(vector)
            .ok_or_else(|| BuilderError::InvalidOperand {
                op: "cc.stdvec_size",
                value: vector,
                reason: "value is not defined in this kernel".to_string(),
            })?;
        if !vector_ty.is_stdvec() {
            return Err(BuilderError::InvalidOperand {
                op: "cc.stdvec_size",
                value: vector,
                reason: format!("expected a !cc.stdvec value, found {}", vector_ty),
            });
        }
        let result = self.next_value();
        self.append(Inst::StdvecSize {
            result,
            vector,
            vector_ty,
        });
        Ok(result)
    }

    /// Number of instructions in the body, including the terminator.
    pub fn inst_count(&self) -> usize {
        self.function.body.inst_count()
    }
}
