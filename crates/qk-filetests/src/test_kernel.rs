//! The `kernel` subtest - build kernels from parameter lists and filecheck the
//! printed IR

use qk_builder::{BuilderSession, ParameterType};
use qk_ir::parse_type;

use crate::{filecheck::match_filecheck, parser::parse_test_file};

/// Split `text` at commas that are not nested inside `<>`, `{}` or `()`.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        match ch {
            '<' | '{' | '(' => depth += 1,
            '>' | '}' | ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = text[start..].trim();
    if !last.is_empty() || !parts.is_empty() {
        parts.push(last);
    }
    parts
}

/// Parse one parameter: an IR type spelling, or `host(name)` for a host type
/// with no encoding.
fn parse_parameter(text: &str) -> Result<ParameterType, String> {
    if let Some(name) = text
        .strip_prefix("host(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return Ok(ParameterType::host(name.trim()));
    }
    let ty = parse_type(text).map_err(|e| format!("bad parameter type '{}': {}", text, e))?;
    ParameterType::try_from(&ty).map_err(|e| e.to_string())
}

/// Parse a `kernel(...)` header into its parameter list.
pub fn parse_kernel_header(header: &str) -> Result<Vec<ParameterType>, String> {
    let inner = header
        .trim()
        .strip_prefix("kernel(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| format!("malformed kernel header '{}'", header))?;
    split_top_level(inner)
        .into_iter()
        .map(parse_parameter)
        .collect()
}

/// Run tests from kernel test files
#[allow(dead_code)]
pub fn run_tests_from_file(content: &str) {
    let test_cases = parse_test_file(content);
    assert!(!test_cases.is_empty(), "No test cases found in test file");

    for case in test_cases {
        assert_eq!(
            case.command, "test kernel",
            "Unexpected test command: {}",
            case.command
        );
        run_kernel_test(&case.item_text, &case.expected_text);
    }
}

/// Build and print one kernel.
///
/// An `error:` line in the expectation means the build must fail with a
/// message containing the rest of that line. Otherwise the expectation holds
/// filecheck directives for the printed kernel.
#[allow(dead_code)]
fn run_kernel_test(header: &str, expected_text: &str) {
    let types = parse_kernel_header(header).unwrap_or_else(|e| panic!("{}", e));

    let mut session = BuilderSession::new();
    let result = session.make_kernel(&types);

    let expected_error = expected_text
        .lines()
        .find_map(|line| line.trim().strip_prefix("error:"))
        .map(str::trim);

    match (result, expected_error) {
        (Ok((kernel, _)), None) => {
            session
                .finalize(&kernel)
                .unwrap_or_else(|e| panic!("Failed to finalize {}: {}", header, e));
            let actual = session
                .print(&kernel)
                .unwrap_or_else(|e| panic!("Failed to print {}: {}", header, e));
            if let Err(msg) = match_filecheck(&actual, expected_text) {
                panic!("Kernel test failed for {}:\n{}\n\nOutput:\n{}", header, msg, actual);
            }
        }
        (Ok((kernel, _)), Some(expected)) => panic!(
            "Kernel test failed for {}: expected error '{}' but built {}",
            header, expected, kernel
        ),
        (Err(e), Some(expected)) => assert!(
            e.to_string().contains(expected),
            "Kernel test failed for {}: expected error '{}', got '{}'",
            header,
            expected,
            e
        ),
        (Err(e), None) => panic!("Failed to build {}: {}", header, e),
    }
}
