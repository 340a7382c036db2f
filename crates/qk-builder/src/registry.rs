//! Kernel registry.
//!
//! Hands out kernel identifiers and records which kernels are live. An
//! identifier is never handed out twice by the same registry, and every
//! registry in the process owns a distinct namespace, so kernel names built
//! from `{namespace}_{id}` are unique process-wide.
//!
//! Symbols are `{prefix}{namespace}_{id}`. Identifiers never contain `_`, so a
//! symbol determines its stem `{prefix}{namespace}`; registries claim their
//! stem as well as their namespace, which keeps symbols unique process-wide
//! whatever prefixes are in use.
//!
//! Registries are shared as `Arc<KernelRegistry>`. The process-wide instance
//! from [`KernelRegistry::global`] is what sessions use by default; tests and
//! embedders that want isolated numbering create their own with
//! [`KernelRegistry::with_namespace`].

use std::{
    collections::{HashMap, HashSet},
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, OnceLock,
    },
};

use log::debug;
use parking_lot::Mutex;

use crate::{
    config::{DEFAULT_NAMESPACE, DEFAULT_SYMBOL_PREFIX},
    error::BuilderError,
    handle::KernelHandle,
};

/// Identifier of a kernel within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KernelId(u64);

impl KernelId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for KernelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Namespaces and symbol stems claimed by registries created in this process.
/// Claims are never given back, since kernels named under them may still be
/// printed. The defaults always belong to the global registry.
#[derive(Debug)]
struct Claims {
    namespaces: HashSet<String>,
    stems: HashSet<String>,
}

fn claims() -> &'static Mutex<Claims> {
    static CLAIMS: OnceLock<Mutex<Claims>> = OnceLock::new();
    CLAIMS.get_or_init(|| {
        Mutex::new(Claims {
            namespaces: HashSet::from([DEFAULT_NAMESPACE.to_string()]),
            stems: HashSet::from([format!("{}{}", DEFAULT_SYMBOL_PREFIX, DEFAULT_NAMESPACE)]),
        })
    })
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$')
}

fn is_symbol_text(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_symbol_char)
}

/// Allocates kernel identifiers and tracks registered kernels.
#[derive(Debug)]
pub struct KernelRegistry {
    namespace: String,
    symbol_prefix: String,
    next_id: AtomicU64,
    kernels: Mutex<HashMap<KernelId, KernelHandle>>,
}

impl KernelRegistry {
    /// Create a registry owning `namespace`, emitting symbols with the
    /// default prefix.
    ///
    /// Fails if the namespace is not symbol text or if another registry in
    /// this process already owns it.
    pub fn with_namespace(namespace: impl Into<String>) -> Result<Self, BuilderError> {
        Self::with_symbol_prefix(namespace, DEFAULT_SYMBOL_PREFIX)
    }

    /// Create a registry owning `namespace` whose kernel symbols start with
    /// `prefix`. The prefix may be empty.
    ///
    /// Besides the namespace checks of [`with_namespace`](Self::with_namespace),
    /// fails if the prefix holds non-symbol characters or if another registry
    /// already emits symbols with the same `{prefix}{namespace}` stem.
    pub fn with_symbol_prefix(
        namespace: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Result<Self, BuilderError> {
        let namespace = namespace.into();
        let prefix = prefix.into();
        if !is_symbol_text(&namespace) {
            return Err(BuilderError::InvalidNamespace(namespace));
        }
        if !prefix.chars().all(is_symbol_char) {
            return Err(BuilderError::InvalidSymbolPrefix(prefix));
        }

        let stem = format!("{}{}", prefix, namespace);
        let mut claims = claims().lock();
        if claims.namespaces.contains(&namespace) {
            return Err(BuilderError::NamespaceInUse(namespace));
        }
        if claims.stems.contains(&stem) {
            return Err(BuilderError::SymbolPrefixInUse { prefix, namespace });
        }
        claims.namespaces.insert(namespace.clone());
        claims.stems.insert(stem);
        drop(claims);

        Ok(Self::claimed(namespace, prefix))
    }

    fn claimed(namespace: String, symbol_prefix: String) -> Self {
        debug!(
            "created kernel registry for namespace `{}` with symbol prefix `{}`",
            namespace, symbol_prefix
        );
        Self {
            namespace,
            symbol_prefix,
            next_id: AtomicU64::new(0),
            kernels: Mutex::new(HashMap::new()),
        }
    }

    /// The process-wide registry, created on first use.
    pub fn global() -> Arc<KernelRegistry> {
        static GLOBAL: OnceLock<Arc<KernelRegistry>> = OnceLock::new();
        GLOBAL
            .get_or_init(|| {
                Arc::new(Self::claimed(
                    DEFAULT_NAMESPACE.to_string(),
                    DEFAULT_SYMBOL_PREFIX.to_string(),
                ))
            })
            .clone()
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn symbol_prefix(&self) -> &str {
        &self.symbol_prefix
    }

    /// Take the next identifier. Safe to call from any thread; concurrent
    /// callers always receive distinct identifiers.
    pub fn reserve(&self) -> KernelId {
        let id = KernelId(self.next_id.fetch_add(1, Ordering::Relaxed));
        debug!("reserved kernel id {} in `{}`", id, self.namespace);
        id
    }

    /// The identifier the next [`reserve`](Self::reserve) would return.
    pub fn peek_next(&self) -> KernelId {
        KernelId(self.next_id.load(Ordering::Relaxed))
    }

    /// Kernel name for an identifier: `{namespace}_{id}`.
    pub fn kernel_name(&self, id: KernelId) -> String {
        format!("{}_{}", self.namespace, id)
    }

    /// Function symbol for an identifier: `{prefix}{namespace}_{id}`.
    pub fn symbol_for(&self, id: KernelId) -> String {
        format!("{}{}", self.symbol_prefix, self.kernel_name(id))
    }

    /// Record a built kernel under its identifier.
    pub fn register(&self, id: KernelId, handle: KernelHandle) -> Result<(), BuilderError> {
        let mut kernels = self.kernels.lock();
        if kernels.contains_key(&id) {
            return Err(BuilderError::DuplicateKernel { id });
        }
        kernels.insert(id, handle);
        Ok(())
    }

    /// Find a live kernel.
    pub fn lookup(&self, id: KernelId) -> Result<KernelHandle, BuilderError> {
        self.kernels
            .lock()
            .get(&id)
            .cloned()
            .ok_or(BuilderError::UnknownKernel { id })
    }

    /// Forget a kernel. Its identifier stays consumed.
    pub fn release(&self, id: KernelId) -> Option<KernelHandle> {
        let released = self.kernels.lock().remove(&id);
        if released.is_some() {
            debug!("released kernel id {} in `{}`", id, self.namespace);
        }
        released
    }

    /// Number of live kernels.
    pub fn len(&self) -> usize {
        self.kernels.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.lock().is_empty()
    }
}
