//! Filecheck matching of printed IR.

use filecheck::{Checker, CheckerBuilder, NO_VARIABLES};

/// Build a checker from expectation text.
///
/// Lines that are not filecheck directives are ignored, so plain notes can sit
/// next to `check:` lines.
pub fn build_filechecker(expected_text: &str) -> Result<Checker, String> {
    let mut builder = CheckerBuilder::new();
    for line in expected_text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        builder
            .directive(line)
            .map_err(|e| format!("bad filecheck directive '{}': {}", line, e))?;
    }
    Ok(builder.finish())
}

/// Match printed output against filecheck directives.
pub fn match_filecheck(actual: &str, expected_text: &str) -> Result<(), String> {
    let checker = build_filechecker(expected_text)?;
    if checker.is_empty() {
        return Err(String::from("no filecheck directives found"));
    }

    if checker
        .check(actual, NO_VARIABLES)
        .map_err(|e| format!("filecheck error: {}", e))?
    {
        Ok(())
    } else {
        let (_, explain) = checker
            .explain(actual, NO_VARIABLES)
            .map_err(|e| format!("filecheck explain failed: {}", e))?;
        Err(format!("filecheck failed:\n{}", explain))
    }
}
