//! Hygiene: enforces coding standards at test time
//!
//! Scans the canvas crate's production sources (everything under `src/`
//! except `*_test.rs`) for patterns the engine must not contain. Every budget
//! is zero: the engine runs inside a browser tab where a panic kills the page,
//! and diagnostics go through `tracing` rather than ad hoc printing.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

/// A forbidden pattern and what it indicates.
struct Rule {
    pattern: &'static str,
    why: &'static str,
}

const PANICS: &[Rule] = &[
    Rule { pattern: ".unwrap()", why: "propagate or handle the error" },
    Rule { pattern: ".expect(", why: "propagate or handle the error" },
    Rule { pattern: "panic!(", why: "return an error instead" },
    Rule { pattern: "unreachable!(", why: "make the state unrepresentable" },
    Rule { pattern: "todo!(", why: "finish the stub" },
    Rule { pattern: "unimplemented!(", why: "finish the stub" },
];

const SILENT_LOSS: &[Rule] = &[
    Rule { pattern: "let _ =", why: "inspect the result" },
    Rule { pattern: ".ok()", why: "inspect the error before dropping it" },
];

const STYLE: &[Rule] = &[
    Rule { pattern: "#[allow(dead_code)]", why: "delete unused code" },
    Rule { pattern: "println!(", why: "log through tracing" },
    Rule { pattern: "eprintln!(", why: "log through tracing" },
    Rule { pattern: "dbg!(", why: "remove debugging leftovers" },
];

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

/// Every `path:line` where a rule matches, with the rule's advice.
fn violations(files: &[SourceFile], rules: &[Rule]) -> Vec<String> {
    let mut found = Vec::new();
    for file in files {
        for (n, line) in file.content.lines().enumerate() {
            for rule in rules.iter().filter(|r| line.contains(r.pattern)) {
                found.push(format!("  {}:{} `{}` ({})", file.path, n + 1, rule.pattern, rule.why));
            }
        }
    }
    found
}

fn assert_clean(rules: &[Rule]) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the canvas crate root");
    let found = violations(&files, rules);
    assert!(found.is_empty(), "forbidden patterns found:\n{}", found.join("\n"));
}

#[test]
fn no_panicking_calls() {
    assert_clean(PANICS);
}

#[test]
fn no_silently_dropped_errors() {
    assert_clean(SILENT_LOSS);
}

#[test]
fn style_rules() {
    assert_clean(STYLE);
}
