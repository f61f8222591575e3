//! Hygiene: source-level budgets for the skymap crate.
//!
//! Each rule scans production `.rs` files under `src/` (test files excluded)
//! for a pattern and fails when the count exceeds its budget. Budgets only
//! go down.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

/// One banned pattern and how many occurrences are tolerated.
struct Rule {
    pattern: &'static str,
    budget: usize,
    why: &'static str,
}

const PANICS: &[Rule] = &[
    Rule { pattern: ".unwrap()", budget: 0, why: "propagate or handle the error" },
    Rule { pattern: ".expect(", budget: 0, why: "propagate or handle the error" },
    Rule { pattern: "panic!(", budget: 0, why: "the map must never crash its host" },
    Rule { pattern: "unreachable!(", budget: 0, why: "encode the invariant in the type" },
    Rule { pattern: "todo!(", budget: 0, why: "finish the stub" },
    Rule { pattern: "unimplemented!(", budget: 0, why: "finish the stub" },
];

const SILENT_LOSS: &[Rule] = &[
    Rule { pattern: "let _ =", budget: 0, why: "inspect the value or drop it explicitly" },
    Rule { pattern: ".ok()", budget: 0, why: "errors must reach the caller" },
];

const STRUCTURE: &[Rule] = &[
    Rule { pattern: "#[allow(dead_code)]", budget: 0, why: "delete unused code" },
    Rule { pattern: "println!(", budget: 0, why: "the library writes nothing to stdout" },
    Rule { pattern: "eprintln!(", budget: 0, why: "the library writes nothing to stderr" },
    Rule { pattern: "thread_rng", budget: 0, why: "randomness must come from an explicit seed" },
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

/// Violations of every rule in `rules`, one message per exceeded budget.
fn violations(files: &[SourceFile], rules: &[Rule]) -> Vec<String> {
    rules
        .iter()
        .filter_map(|rule| {
            let hits: Vec<(String, usize)> = files
                .iter()
                .map(|f| (f.path.clone(), f.content.lines().filter(|l| l.contains(rule.pattern)).count()))
                .filter(|(_, n)| *n > 0)
                .collect();
            let count: usize = hits.iter().map(|(_, n)| n).sum();
            (count > rule.budget).then(|| {
                let detail: Vec<String> = hits.iter().map(|(p, n)| format!("    {p}: {n}")).collect();
                format!(
                    "`{}` budget exceeded: found {count}, max {} ({})\n{}",
                    rule.pattern,
                    rule.budget,
                    rule.why,
                    detail.join("\n")
                )
            })
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("lib.rs")), "run from the crate root");
    assert!(!files.iter().any(|f| f.path.ends_with("_test.rs")));
}

#[test]
fn panic_budget() {
    let found = violations(&source_files(), PANICS);
    assert!(found.is_empty(), "{}", found.join("\n"));
}

#[test]
fn silent_loss_budget() {
    let found = violations(&source_files(), SILENT_LOSS);
    assert!(found.is_empty(), "{}", found.join("\n"));
}

#[test]
fn structure_budget() {
    let found = violations(&source_files(), STRUCTURE);
    assert!(found.is_empty(), "{}", found.join("\n"));
}
