//! The `cat` subtest - parse/print roundtrip tests

use qk_ir::parse_function;

use crate::parser::{normalize_ir, parse_test_file};

/// Run tests from cat test files
#[allow(dead_code)]
pub fn run_tests_from_file(content: &str) {
    let test_cases = parse_test_file(content);
    assert!(!test_cases.is_empty(), "No test cases found in test file");

    for case in test_cases {
        assert_eq!(
            case.command, "test cat",
            "Unexpected test command: {}",
            case.command
        );
        run_cat_test(&case.item_text, &case.expected_text);
    }
}

/// Parse and print a function, then parse the output again.
///
/// With no expectation the function must print back as written.
#[allow(dead_code)]
fn run_cat_test(function_text: &str, expected_text: &str) {
    let func = parse_function(function_text).unwrap_or_else(|e| {
        panic!(
            "Failed to parse function: {}\n\nFunction text:\n{}",
            e, function_text
        )
    });

    let actual = func.to_string();
    let expected = if expected_text.is_empty() {
        function_text
    } else {
        expected_text
    };
    if normalize_ir(&actual) != normalize_ir(expected) {
        panic!(
            "Cat test failed!\n\nExpected:\n{}\n\nActual:\n{}\n\nOriginal function:\n{}",
            expected, actual, function_text
        );
    }

    // Printed text is a fixed point
    let reparsed = parse_function(&actual)
        .unwrap_or_else(|e| panic!("Printed function does not parse: {}\n\n{}", e, actual));
    assert_eq!(reparsed, func, "Roundtrip changed the function:\n{}", actual);
}
