//! Layering guardrails for the semantic core.
//!
//! `pycoll_core` holds policy only and must stay dependency-free so it can be fuzzed and reused on its own.
//! This test scans its `Cargo.toml` and fails if anything appears in `[dependencies]`.

#[test]
fn semantic_core_has_no_dependencies() {
    let manifest = include_str!("../crates/pycoll_core/Cargo.toml");
    let mut in_dependencies = false;

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if !line_no_comment.is_empty() {
            panic!("`pycoll_core` must not have dependencies, found: {line_no_comment}");
        }
    }
}

#[test]
fn runtime_depends_on_core_by_path() {
    let manifest = include_str!("../Cargo.toml");
    assert!(
        manifest.contains("pycoll_core = { path = \"crates/pycoll_core\" }"),
        "the runtime crate must take the semantic core from the workspace"
    );
}
