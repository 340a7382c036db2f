//! End-to-end tests for building and printing kernels.

use std::{collections::HashSet, sync::Arc, thread};

use qk_builder::{
    make_kernel, BuilderConfig, BuilderError, BuilderSession, KernelRegistry, ParameterType,
    ScalarKind,
};
use qk_ir::{parse_function, parse_module, Type};

fn session(namespace: &str) -> BuilderSession {
    BuilderSession::with_registry(Arc::new(KernelRegistry::with_namespace(namespace).unwrap()))
}

#[test]
fn test_list_kernel_prints_entrypoint() {
    let mut session = BuilderSession::new();
    let (kernel, args) = session.make_kernel(&[ParameterType::list()]).unwrap();
    assert_eq!(args.len(), 1);
    assert_eq!(args[0].ir_type(), &Type::stdvec(Type::F64));

    let text = session.print(&kernel).unwrap();
    let first = text.lines().next().unwrap();
    assert!(
        first.starts_with("func.func @__nvqpp__mlirgen____nvqppBuilderKernel_"),
        "unexpected header: {}",
        first
    );
    assert!(first.contains("(%arg0: !cc.stdvec<f64>) attributes {\"cudaq-entrypoint\""));
    assert!(text.lines().any(|line| line.trim() == "return"));
}

#[test]
fn test_exact_output() {
    let mut session = session("exact");
    let (kernel, args) = session.make_kernel(&[ParameterType::list()]).unwrap();
    session.body(&kernel).unwrap().stdvec_size(args[0].value()).unwrap();
    session.finalize(&kernel).unwrap();

    let expected = "\
func.func @__nvqpp__mlirgen__exact_0(%arg0: !cc.stdvec<f64>) attributes {\"cudaq-entrypoint\", \"cudaq-kernel\"} {
  %0 = cc.stdvec_size %arg0 : (!cc.stdvec<f64>) -> i64
  return
}
";
    assert_eq!(session.print(&kernel).unwrap(), expected);
}

#[test]
fn test_empty_parameter_list() {
    let (session, kernel, args) = make_kernel(&[]).unwrap();
    assert!(args.is_empty());
    assert_eq!(kernel.argument_count(), 0);
    let text = session.print(&kernel).unwrap();
    assert!(text.contains(&format!("@{}()", kernel.symbol())));
}

#[test]
fn test_unsupported_type_consumes_no_id() {
    let registry = Arc::new(KernelRegistry::with_namespace("no_id_consumed").unwrap());
    let mut session = BuilderSession::with_registry(Arc::clone(&registry));

    let err = session
        .make_kernel(&[ParameterType::sequence(ParameterType::host("object"))])
        .unwrap_err();
    assert!(matches!(err, BuilderError::UnsupportedType { ref ty } if ty == "object"));
    assert!(err.to_string().contains("object"));
    assert!(registry.is_empty());

    let (kernel, _) = session.make_kernel(&[ParameterType::list()]).unwrap();
    assert_eq!(kernel.id().as_u64(), 0);
    assert_eq!(kernel.name(), "no_id_consumed_0");
}

#[test]
fn test_symbols_unique_across_threads() {
    let workers: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                let mut session = BuilderSession::new();
                let symbols: Vec<String> = (0..25)
                    .map(|_| {
                        let (kernel, _) = session.make_kernel(&[ParameterType::list()]).unwrap();
                        kernel.symbol().to_string()
                    })
                    .collect();
                symbols
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for worker in workers {
        for symbol in worker.join().unwrap() {
            assert!(seen.insert(symbol.clone()), "duplicate symbol {}", symbol);
        }
    }
    assert_eq!(seen.len(), 200);
}

#[test]
fn test_sessions_moved_between_threads() {
    let mut session = session("moved");
    let (kernel, _) = session.make_kernel(&[ParameterType::int64()]).unwrap();
    let handle = thread::spawn(move || {
        session.finalize(&kernel).unwrap();
        session.print(&kernel).unwrap()
    });
    let text = handle.join().unwrap();
    assert!(text.contains("%arg0: i64"));
}

#[test]
fn test_print_is_idempotent() {
    let mut session = session("idempotent");
    let (kernel, args) = session
        .make_kernel(&[ParameterType::list(), ParameterType::float64()])
        .unwrap();
    {
        let mut body = session.body(&kernel).unwrap();
        body.stdvec_size(args[0].value()).unwrap();
        body.const_f64(0.25).unwrap();
    }
    let first = session.print(&kernel).unwrap();
    assert_eq!(first, session.print(&kernel).unwrap());
    assert_eq!(first, session.print(&kernel).unwrap());
}

#[test]
fn test_partial_kernel_prints_then_is_sealed() {
    let mut session = session("sealed_by_print");
    let (kernel, args) = session.make_kernel(&[ParameterType::list()]).unwrap();
    session.body(&kernel).unwrap().stdvec_size(args[0].value()).unwrap();
    assert!(!kernel.is_finalized());

    let text = session.print(&kernel).unwrap();
    assert!(text.contains("%0 = cc.stdvec_size %arg0"));
    assert!(kernel.is_finalized());
    assert!(matches!(
        session.body(&kernel),
        Err(BuilderError::KernelFinalized { .. })
    ));
    session.finalize(&kernel).unwrap();
}

#[test]
fn test_identical_requests_print_identically_modulo_symbol() {
    let mut session = session("twins");
    let (a, _) = session.make_kernel(&[ParameterType::list()]).unwrap();
    let (b, _) = session.make_kernel(&[ParameterType::list()]).unwrap();
    assert_ne!(a.symbol(), b.symbol());
    let a_text = session.print(&a).unwrap().replace(a.symbol(), "K");
    let b_text = session.print(&b).unwrap().replace(b.symbol(), "K");
    assert_eq!(a_text, b_text);
}

#[test]
fn test_finalize_idempotent_then_mutation_fails() {
    let mut session = session("finalized");
    let (kernel, _) = session.make_kernel(&[ParameterType::list()]).unwrap();
    session.finalize(&kernel).unwrap();
    let printed = session.print(&kernel).unwrap();
    session.finalize(&kernel).unwrap();
    assert_eq!(session.print(&kernel).unwrap(), printed);

    let err = session.body(&kernel).unwrap_err();
    assert!(matches!(err, BuilderError::KernelFinalized { .. }));
    assert_eq!(session.print(&kernel).unwrap(), printed);
}

#[test]
fn test_finalized_state_visible_through_registry() {
    let mut session = session("shared_state");
    let (kernel, _) = session.make_kernel(&[]).unwrap();
    let looked_up = session.lookup(kernel.id()).unwrap();
    session.finalize(&kernel).unwrap();
    assert!(looked_up.is_finalized());
}

#[test]
fn test_lookup_after_session_dropped() {
    let registry = Arc::new(KernelRegistry::with_namespace("dropped").unwrap());
    let kernel = {
        let mut session = BuilderSession::with_registry(Arc::clone(&registry));
        session.make_kernel(&[ParameterType::list()]).unwrap().0
    };
    assert!(matches!(
        registry.lookup(kernel.id()),
        Err(BuilderError::UnknownKernel { .. })
    ));
}

#[test]
fn test_printed_kernel_parses_back() {
    let mut session = session("roundtrip");
    let (kernel, args) = session
        .make_kernel(&[
            ParameterType::list(),
            ParameterType::scalar(ScalarKind::Complex64),
            ParameterType::Aggregate(vec![ParameterType::int64(), ParameterType::list()]),
        ])
        .unwrap();
    {
        let mut body = session.body(&kernel).unwrap();
        body.stdvec_size(args[0].value()).unwrap();
        body.const_i64(-7).unwrap();
        body.const_f64(1.5).unwrap();
    }
    session.finalize(&kernel).unwrap();

    let parsed = parse_function(&session.print(&kernel).unwrap()).unwrap();
    assert_eq!(&parsed, session.function(&kernel).unwrap());

    let module = parse_module(&session.print_module()).unwrap();
    assert_eq!(&module, session.module());
    assert_eq!(module.entry_points().count(), 1);
}

#[test]
fn test_custom_symbol_prefix() {
    let registry = Arc::new(KernelRegistry::with_symbol_prefix("prefixed", "qk.").unwrap());
    let config = BuilderConfig::new().with_kernel_attr(false);
    let mut session = BuilderSession::with_config(registry, config);
    let (kernel, _) = session.make_kernel(&[ParameterType::float64()]).unwrap();
    assert_eq!(kernel.symbol(), "qk.prefixed_0");
    let text = session.print(&kernel).unwrap();
    assert!(text.starts_with("func.func @qk.prefixed_0(%arg0: f64) attributes {\"cudaq-entrypoint\"} {"));
    assert_eq!(&parse_function(&text).unwrap(), session.function(&kernel).unwrap());
}

#[test]
fn test_prefixes_cannot_alias_symbols() {
    let mut ab = session("alias_ab");
    let (kernel, _) = ab.make_kernel(&[ParameterType::int64()]).unwrap();
    assert_eq!(kernel.symbol(), "__nvqpp__mlirgen__alias_ab_0");

    let err = KernelRegistry::with_symbol_prefix("b", "__nvqpp__mlirgen__alias_a").unwrap_err();
    assert!(matches!(err, BuilderError::SymbolPrefixInUse { .. }));

    let other = Arc::new(KernelRegistry::with_symbol_prefix("b", "alias.").unwrap());
    let mut b = BuilderSession::with_registry(other);
    let (foreign, _) = b.make_kernel(&[ParameterType::list()]).unwrap();
    assert_ne!(foreign.symbol(), kernel.symbol());
    assert_ne!(foreign, kernel);
    assert!(matches!(
        ab.print(&foreign),
        Err(BuilderError::UnknownKernel { .. })
    ));
    assert!(!foreign.is_finalized());
}

#[test]
fn test_prefix_must_parse() {
    assert!(matches!(
        KernelRegistry::with_symbol_prefix("spaced", "my kernel "),
        Err(BuilderError::InvalidSymbolPrefix(_))
    ));
}

#[test]
fn test_constants_must_fit_their_type() {
    let mut session = session("constants");
    let (kernel, _) = session.make_kernel(&[]).unwrap();
    {
        let mut body = session.body(&kernel).unwrap();
        assert!(matches!(
            body.const_int(300, Type::I8),
            Err(BuilderError::InvalidConstantValue { .. })
        ));
        assert!(matches!(
            body.const_int(-5, Type::I1),
            Err(BuilderError::InvalidConstantValue { .. })
        ));
        body.const_int(127, Type::I8).unwrap();
    }
    session.finalize(&kernel).unwrap();
    let text = session.print(&kernel).unwrap();
    assert!(text.contains("%0 = arith.constant 127 : i8"));
    assert!(!text.contains("300"));
}
