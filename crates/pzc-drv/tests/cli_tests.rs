//! CLI end-to-end tests.
//!
//! Each test writes a PL/0 program into a temporary directory, runs the
//! real `pzc` binary on it, and asserts on stdout, stderr, and the exit
//! status.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn pzc_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pzc"))
}

fn write_source(dir: &Path, source: &str) -> PathBuf {
    let path = dir.join("program.p0");
    std::fs::write(&path, source).expect("source file is writable");
    path
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(pzc_bin());
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage").or(predicate::str::contains("pzc")));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::new(pzc_bin());
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("pzc"));
}

#[test]
fn test_cli_missing_file() {
    let mut cmd = Command::new(pzc_bin());
    cmd.arg("does_not_exist.p0");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unable to open"));
}

#[test]
fn test_constant_arithmetic_prints_eight() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(dir.path(), "const a = 5; var b; begin b := a + 3; write b end.");

    let mut cmd = Command::new(pzc_bin());
    cmd.arg(&source);
    cmd.assert()
        .success()
        .stdout("8\n")
        .stderr(predicate::str::contains(
            "No errors, program is syntactically correct.",
        ));
}

#[test]
fn test_read_two_values_multiply() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(dir.path(), "var x, y; begin read x; read y; write x * y end.");

    let mut cmd = Command::new(pzc_bin());
    cmd.arg(&source).write_stdin("4 7");
    cmd.assert().success().stdout("28\n");
}

#[test]
fn test_while_loop_output() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(
        dir.path(),
        "var i; begin i := 0; while i < 3 do begin write i; i := i + 1 end end.",
    );

    let mut cmd = Command::new(pzc_bin());
    cmd.arg(&source);
    cmd.assert().success().stdout("0\n1\n2\n");
}

#[test]
fn test_odd_condition_both_branches() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(
        dir.path(),
        "var n; begin read n; if odd n then write n else write 0 end.",
    );

    let mut cmd = Command::new(pzc_bin());
    cmd.arg(&source).write_stdin("7");
    cmd.assert().success().stdout("7\n");

    let mut cmd = Command::new(pzc_bin());
    cmd.arg(&source).write_stdin("8");
    cmd.assert().success().stdout("0\n");
}

#[test]
fn test_procedure_trace_brackets_activation_record() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(
        dir.path(),
        "procedure p; var a; begin a := 10; write a end; call p.",
    );

    let mut cmd = Command::new(pzc_bin());
    cmd.arg(&source).arg("-v");
    let assert = cmd.assert().success();
    let output = assert.get_output();
    let stdout = String::from_utf8(output.stdout.clone()).expect("stdout is ASCII");

    assert!(stdout.starts_with("10\n"));
    // The trace shows p's activation record behind a separator while p is
    // live, and the separator is gone on the final state line.
    assert!(stdout.contains('|'));
    assert!(!stdout.lines().last().unwrap().contains('|'));
}

#[test]
fn test_scanner_error_stops_pipeline() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(dir.path(), "var x; begin x := 1abc end.");

    let mut cmd = Command::new(pzc_bin());
    cmd.arg(&source);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error 22. Variable does not start with a letter.",
        ))
        .stderr(predicate::str::contains("No errors").not())
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_parse_error_reports_sentence() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(dir.path(), "begin end");

    let mut cmd = Command::new(pzc_bin());
    cmd.arg(&source);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error 6. Period expected."));
}

#[test]
fn test_undeclared_identifier_reported() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(dir.path(), "begin ghost := 1 end.");

    let mut cmd = Command::new(pzc_bin());
    cmd.arg(&source);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error 7. Undeclared identifier."));
}

#[test]
fn test_print_lexemes_directive() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(dir.path(), "var x; x := 3.");

    let mut cmd = Command::new(pzc_bin());
    cmd.arg(&source).arg("-l");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("29 2 0 18 2 0 20 3 1 19"))
        .stdout(predicate::str::contains("x 3"));
}

#[test]
fn test_print_assembly_directive() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(dir.path(), "begin end.");

    let mut cmd = Command::new(pzc_bin());
    cmd.arg(&source).arg("-a");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("7 0 0 1\n6 0 0 4\n2 0 0 0\n11 0 0 3\n"));
}

#[test]
fn test_artifacts_directory() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(dir.path(), "const a = 5; var b; begin b := a + 3; write b end.");
    let artifacts = dir.path().join("out");

    let mut cmd = Command::new(pzc_bin());
    cmd.arg(&source).arg("--artifacts").arg(&artifacts);
    cmd.assert().success();

    let lexemes = std::fs::read_to_string(artifacts.join("lexemelist.txt")).unwrap();
    assert!(lexemes.starts_with("28 2 0 9 3 1 18"));

    let names = std::fs::read_to_string(artifacts.join("nametable.txt")).unwrap();
    assert_eq!(names, "a 5 b 3");

    let mcode = std::fs::read_to_string(artifacts.join("mcode.txt")).unwrap();
    assert!(mcode.starts_with("7 0 0 1\n6 0 0 5\n"));

    let trace = std::fs::read_to_string(artifacts.join("stacktrace.txt")).unwrap();
    assert!(trace.starts_with("line\tOP\tR\tL\tM\n"));
    assert!(trace.contains("Initial values"));
}

#[test]
fn test_trace_preserved_on_runtime_fault() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(dir.path(), "var x, y; begin x := 0; y := 1 / x end.");
    let artifacts = dir.path().join("out");

    let mut cmd = Command::new(pzc_bin());
    cmd.arg(&source).arg("--artifacts").arg(&artifacts);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("division by zero"));

    // The trace up to the faulting instruction was still written.
    let trace = std::fs::read_to_string(artifacts.join("stacktrace.txt")).unwrap();
    assert!(trace.contains("LIT"));
}

#[test]
fn test_empty_begin_end_program() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(dir.path(), "begin end.");

    let mut cmd = Command::new(pzc_bin());
    cmd.arg(&source);
    cmd.assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn test_comment_heavy_source() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(
        dir.path(),
        "/* header */ var x; /* decl done */ begin x := 2; write x end. /* trailing */",
    );

    let mut cmd = Command::new(pzc_bin());
    cmd.arg(&source);
    cmd.assert().success().stdout("2\n");
}
