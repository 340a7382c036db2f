//! Errors raised while building kernels.

use qk_ir::{Value, VerifierError};
use thiserror::Error;

use crate::registry::KernelId;

/// Errors from the kernel builder.
///
/// Every failure is returned synchronously to the caller and none are retried
/// internally. A failed [`crate::BuilderSession::make_kernel`] leaves no
/// kernel registered and consumes no identifier.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// A requested parameter type has no IR encoding.
    #[error("unsupported kernel parameter type `{ty}`")]
    UnsupportedType { ty: String },

    /// A finalized kernel was modified.
    #[error("kernel `{kernel}` is finalized and can no longer be modified")]
    KernelFinalized { kernel: String },

    /// No kernel is known under this identifier.
    #[error("no kernel registered under id {id}")]
    UnknownKernel { id: KernelId },

    /// An identifier was registered twice.
    #[error("kernel id {id} is already registered")]
    DuplicateKernel { id: KernelId },

    /// A body instruction was given an operand it cannot use.
    #[error("invalid operand {value} for `{op}`: {reason}")]
    InvalidOperand {
        op: &'static str,
        value: Value,
        reason: String,
    },

    /// A constant was requested with a type it cannot have.
    #[error("`arith.constant` cannot produce a value of type {ty}")]
    InvalidConstantType { ty: qk_ir::Type },

    /// An integer constant does not fit its type.
    #[error("`arith.constant` value {value} does not fit in {ty}")]
    InvalidConstantValue { value: i64, ty: qk_ir::Type },

    /// The kernel body is not well formed.
    #[error("kernel `{kernel}` failed verification: {}", join_errors(.errors))]
    Verifier {
        kernel: String,
        errors: Vec<VerifierError>,
    },

    /// Another registry in this process already owns the namespace.
    #[error("kernel namespace `{0}` is already in use")]
    NamespaceInUse(String),

    /// The namespace cannot be used inside a symbol name.
    #[error("kernel namespace `{0}` is not a valid symbol name")]
    InvalidNamespace(String),

    /// The symbol prefix contains characters a symbol cannot hold.
    #[error("symbol prefix `{0}` is not valid symbol text")]
    InvalidSymbolPrefix(String),

    /// Another registry already emits symbols starting with this prefix and
    /// namespace.
    #[error("symbols `{prefix}{namespace}_N` are already emitted by another registry")]
    SymbolPrefixInUse { prefix: String, namespace: String },
}

fn join_errors(errors: &[VerifierError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
