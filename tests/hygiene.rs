//! Hygiene: enforces coding standards at test time
//!
//! Cart operations are called straight from page scripts and must never throw,
//! so production code may not panic or quietly drop a `Result`. Each pattern
//! has a budget (zero). If you must add one, fix an existing one first; the
//! budget never grows.

use std::fs;
use std::path::{Path, PathBuf};

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    // Panics: these surface as exceptions in the page.
    Budget { pattern: ".unwrap()", max: 0, why: "panics on None/Err" },
    Budget { pattern: ".expect(", max: 0, why: "panics on None/Err" },
    Budget { pattern: "panic!(", max: 0, why: "explicit panic" },
    Budget { pattern: "unreachable!(", max: 0, why: "explicit panic" },
    Budget { pattern: "todo!(", max: 0, why: "unfinished stub" },
    Budget { pattern: "unimplemented!(", max: 0, why: "unfinished stub" },
    // Silent loss: discards errors without inspecting.
    Budget { pattern: "let _ =", max: 0, why: "discards a value unseen" },
    Budget { pattern: ".ok()", max: 0, why: "drops the error detail" },
    // Style / structure.
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "hides unused code" },
];

/// Modules with no logic of their own, exempt from the sibling-test rule.
const UNTESTED_OK: &[&str] = &["lib.rs", "web.rs", "test_support.rs"];

struct SourceFile {
    path: PathBuf,
    content: String,
}

/// Collect production `.rs` files under `src/`, excluding test files.
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
        if path.extension().is_none_or(|e| e != "rs") || is_test_file(&path) {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path, content });
        }
    }
}

fn is_test_file(path: &Path) -> bool {
    let name = file_name(path);
    name.ends_with("_test.rs") || name == "test_support.rs"
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap_or_default().to_string_lossy().into_owned()
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.display().to_string(), count))
        })
        .collect()
}

#[test]
fn source_tree_is_found() {
    assert!(!source_files().is_empty(), "no sources under src/; run from the crate root");
}

#[test]
fn antipattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let detail: Vec<String> = found.iter().map(|(path, c)| format!("    {path}: {c}")).collect();
            failures.push(format!(
                "{} ({}) budget exceeded: found {count}, max {}\n{}",
                budget.pattern,
                budget.why,
                budget.max,
                detail.join("\n")
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn every_logic_module_has_sibling_tests() {
    let missing: Vec<String> = source_files()
        .iter()
        .map(|file| &file.path)
        .filter(|path| !UNTESTED_OK.contains(&file_name(path).as_str()))
        .filter(|path| {
            let stem = path.file_stem().unwrap_or_default().to_string_lossy().into_owned();
            !path.with_file_name(format!("{stem}_test.rs")).exists()
        })
        .map(|path| path.display().to_string())
        .collect();
    assert!(missing.is_empty(), "modules without a *_test.rs sibling:\n  {}", missing.join("\n  "));
}
