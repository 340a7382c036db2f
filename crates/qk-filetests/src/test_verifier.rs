//! The `verifier` subtest - verifier error detection tests

use qk_ir::{parse_function, verify};

use crate::parser::parse_test_file;

/// Run tests from verifier test files
#[allow(dead_code)]
pub fn run_tests_from_file(content: &str) {
    let test_cases = parse_test_file(content);
    assert!(!test_cases.is_empty(), "No test cases found in test file");

    for case in test_cases {
        assert_eq!(
            case.command, "test verifier",
            "Unexpected test command: {}",
            case.command
        );
        run_verifier_test(&case.item_text);
    }
}

/// Expected error messages from `// error:` annotations
#[allow(dead_code)]
fn extract_error_annotations(function_text: &str) -> Vec<&str> {
    function_text
        .lines()
        .filter_map(|line| line.split_once("// error:"))
        .map(|(_, message)| message.trim())
        .collect()
}

/// Run a single verifier test
#[allow(dead_code)]
fn run_verifier_test(function_text: &str) {
    let func = parse_function(function_text).unwrap_or_else(|e| {
        panic!(
            "Failed to parse function: {}\n\nFunction text:\n{}",
            e, function_text
        )
    });

    let expected_errors = extract_error_annotations(function_text);
    match verify(&func) {
        Ok(()) if expected_errors.is_empty() => {}
        Ok(()) => panic!(
            "Verifier test failed: expected errors but function is valid\n\nFunction:\n{}",
            function_text
        ),
        Err(errors) => {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            if expected_errors.is_empty() {
                panic!(
                    "Verifier test failed: expected valid function but got errors:\n  - {}\n\nFunction:\n{}",
                    messages.join("\n  - "),
                    function_text
                );
            }
            for expected in &expected_errors {
                assert!(
                    messages.iter().any(|m| m.contains(expected)),
                    "Expected error '{}' not reported. Got:\n  - {}\n\nFunction:\n{}",
                    expected,
                    messages.join("\n  - "),
                    function_text
                );
            }
            assert_eq!(
                messages.len(),
                expected_errors.len(),
                "Unexpected extra errors:\n  - {}",
                messages.join("\n  - ")
            );
        }
    }
}
