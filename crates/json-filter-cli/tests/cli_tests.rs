//! Integration tests for the `jfilter` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the apply,
//! canonical and subfilter subcommands through the actual binary, including
//! stdin/stdout piping, file I/O and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

/// Helper: path to the sample.json fixture.
fn sample_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.json")
}

fn jfilter() -> Command {
    Command::cargo_bin("jfilter").unwrap()
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout must be valid JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// apply
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn apply_include_stdin_to_stdout() {
    let output = jfilter()
        .args(["apply", "-f", "name,address.city"])
        .write_stdin(std::fs::read_to_string(sample_json_path()).unwrap())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(
        stdout_json(&output),
        json!({"name": "Alice", "address": {"city": "Canberra"}})
    );
}

#[test]
fn apply_exclude_from_file() {
    let output = jfilter()
        .args(["apply", "-f", "-etag,orders.internal", "-i", sample_json_path()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value = stdout_json(&output);
    assert!(value.get("etag").is_none());
    assert_eq!(
        value["orders"],
        json!([{"id": 1, "total": 10}, {"id": 2, "total": 25}])
    );
    assert_eq!(value["address"]["postcode"], "2600");
}

#[test]
fn apply_file_to_file_pretty() {
    let dir = std::env::temp_dir().join(format!("jfilter-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let output_path = dir.join("out.json");

    jfilter()
        .args(["apply", "-f", "orders.id", "--pretty", "-i", sample_json_path(), "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    assert!(content.contains('\n'), "pretty output spans lines");
    let value: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value, json!({"orders": [{"id": 1}, {"id": 2}]}));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn apply_writes_one_compact_line_to_stdout() {
    jfilter()
        .args(["apply", "-f", "-b"])
        .write_stdin(r#"{"a": 1, "b": 2}"#)
        .assert()
        .success()
        .stdout("{\"a\":1}\n");
}

#[test]
fn apply_reports_unwritable_output_file() {
    jfilter()
        .args(["apply", "-f", "a", "-o", "/nonexistent/dir/out.json"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to write file: /nonexistent/dir/out.json",
        ));
}

#[test]
fn apply_rejects_invalid_filter() {
    jfilter()
        .args(["apply", "-f", "asd("])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid filter specification"))
        .stderr(predicate::str::contains(
            "Error parsing [asd(]. After [asd(] expected one of [IDENTIFIER] but found []",
        ));
}

#[test]
fn apply_rejects_invalid_json() {
    jfilter()
        .args(["apply", "-f", "a"])
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse input JSON"));
}

#[test]
fn apply_reports_missing_input_file() {
    jfilter()
        .args(["apply", "-f", "a", "-i", "/nonexistent/input.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// canonical
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn canonical_merges_and_sorts() {
    jfilter()
        .args(["canonical", "a(c,b),a.d"])
        .assert()
        .success()
        .stdout("a(b,c,d)\n");
}

#[test]
fn canonical_with_count() {
    jfilter()
        .args(["canonical", "--count", "a(b,c),a.d"])
        .assert()
        .success()
        .stdout("a(b,c,d)\n5\n");
}

#[test]
fn canonical_keeps_exclude_prefix() {
    jfilter()
        .args(["canonical", "--", "-key1.key11,key1.key12"])
        .assert()
        .success()
        .stdout("-key1(key11,key12)\n");
}

#[test]
fn canonical_rejects_empty_filter() {
    jfilter()
        .args(["canonical", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "expected one of [IDENTIFIER,DASH] but found []",
        ));
}

// ─────────────────────────────────────────────────────────────────────────────
// subfilter
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn subfilter_prints_descendant_without_dash() {
    jfilter()
        .args([
            "subfilter",
            "--",
            "-feeders(assets(connections(numCores,normalPhases),siteId))",
            "feeders.assets.connections",
        ])
        .assert()
        .success()
        .stdout("connections(normalPhases,numCores)\n");
}

#[test]
fn subfilter_missing_path_fails() {
    jfilter()
        .args(["subfilter", "feeders(assets)", "feeders.blah"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No sub-filter at 'feeders.blah'"));
}

// ─────────────────────────────────────────────────────────────────────────────
// logging
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn verbose_logs_go_to_stderr() {
    jfilter()
        .args(["--verbose", "canonical", "a.b"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout("a.b\n")
        .stderr(predicate::str::contains("using filter"));
}
