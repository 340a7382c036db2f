//! Test file parsing

/// A test case extracted from a test file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// The test command, e.g. `test cat`
    pub command: String,
    /// The item under test: a `func.func` or a `kernel(...)` header
    pub item_text: String,
    /// The `;` lines following the item, with the `;` stripped
    pub expected_text: String,
}

fn is_item_start(line: &str) -> bool {
    line.starts_with("func.func ") || line.starts_with("kernel(")
}

/// Index of the line closing the function that opens at `start`.
fn function_end(lines: &[&str], start: usize) -> usize {
    let mut depth = 0i32;
    let mut opened = false;
    for (j, line) in lines.iter().enumerate().skip(start) {
        // Braces inside comments don't count
        let code = line.split("//").next().unwrap_or("");
        for ch in code.chars() {
            match ch {
                '{' => {
                    depth += 1;
                    opened = true;
                }
                '}' => depth -= 1,
                _ => {}
            }
        }
        if opened && depth <= 0 {
            return j;
        }
    }
    lines.len() - 1
}

fn strip_comment_marker(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix("; ")
        .or_else(|| line.strip_prefix(';'))
        .unwrap_or(line)
}

/// Parse a test file into its cases.
///
/// The first `test <name>` line sets the command for every case in the file.
/// Each case is an item followed by an optional run of `;` lines; blank lines
/// inside the run are allowed.
pub fn parse_test_file(content: &str) -> Vec<TestCase> {
    let lines: Vec<&str> = content.lines().collect();

    let command = lines
        .iter()
        .map(|l| l.trim())
        .find(|l| l.starts_with("test "))
        .map(String::from)
        .unwrap_or_default();

    let mut test_cases = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();
        if !is_item_start(line) {
            i += 1;
            continue;
        }

        let end = if line.starts_with("func.func ") {
            function_end(&lines, i)
        } else {
            i
        };
        let item_text = lines[i..=end].join("\n");

        let mut expected = Vec::new();
        let mut j = end + 1;
        while j < lines.len() {
            let next = lines[j].trim();
            if next.starts_with(';') {
                expected.push(strip_comment_marker(next));
            } else if !next.is_empty() {
                break;
            }
            j += 1;
        }

        test_cases.push(TestCase {
            command: command.clone(),
            item_text,
            expected_text: expected.join("\n"),
        });
        i = j;
    }

    test_cases
}

/// Normalize IR text for comparison
pub fn normalize_ir(ir: &str) -> Vec<String> {
    ir.lines()
        .map(|l| String::from(l.trim()))
        .filter(|l| !l.is_empty())
        .collect()
}
