//! Process-level CLI tests. Error scenarios (§8's size-mismatch,
//! redefinition, unknown-typename cases) are only testable out-of-process:
//! the diagnostic path terminates the process directly rather than
//! returning through a `Result`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn awlc() -> Command {
    Command::cargo_bin("awlc").unwrap()
}

fn write_source(dir: &tempfile::TempDir, name: &str, src: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, src).unwrap();
    path
}

#[test]
fn compiles_minimal_source_and_writes_dot_o_next_to_it() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.awl", "fun main() { }");

    awlc().arg(&input).assert().success();

    let output = PathBuf::from(format!("{}.o", input.display()));
    assert!(output.exists());
    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(&bytes[0..4], &[0x7F, 0x45, 0x4C, 0x46]);
}

#[test]
fn verbose_flag_logs_stage_names_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.awl", "fun main() { }");

    awlc().arg(&input).arg("--verbose").assert().success().stderr(predicate::str::contains("lexing"));
}

#[test]
fn missing_source_file_exits_nonzero_with_program_name_prefix() {
    awlc()
        .arg("/nonexistent/path/to/nothing.awl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("awlc:").and(predicate::str::contains("no such file")));
}

#[test]
fn size_mismatch_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.awl", "fun main() u8 { return 300; }");

    awlc()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("size mismatch; expected 8 bits but got 16 bits"));
}

#[test]
fn duplicate_function_name_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.awl", "fun f() { } fun f() { }");

    awlc().arg(&input).assert().failure().stderr(predicate::str::contains("redefinition of function 'f'"));
}

#[test]
fn unknown_typename_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.awl", "fun f() frob { return 0; }");

    awlc().arg(&input).assert().failure().stderr(predicate::str::contains("unknown typename 'frob'"));
}

#[test]
fn missing_positional_argument_is_a_usage_error() {
    awlc().assert().failure();
}
