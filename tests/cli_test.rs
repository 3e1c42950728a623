use std::{io::Write, process::Command};

use tempfile::NamedTempFile;

fn write_source(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(source.as_bytes()).unwrap();
    file
}

fn run(source: &str) -> (bool, String, String) {
    let file = write_source(source);
    let output = Command::new(env!("CARGO_BIN_EXE_formrw"))
        .arg(file.path())
        .output()
        .unwrap();
    (
        output.status.success(),
        String::from_utf8(output.stdout).unwrap(),
        String::from_utf8(output.stderr).unwrap(),
    )
}

#[test]
fn let_then_show_prints_the_bound_value() {
    let (ok, stdout, _) = run("let x : a\nshow x\n");
    assert!(ok);
    assert_eq!(stdout, "a\n");
}

#[test]
fn show_a_bare_tuple() {
    let (ok, stdout, _) = run("show (a b c)\n");
    assert!(ok);
    assert_eq!(stdout, "(a b c)\n");
}

#[test]
fn show_a_quoted_symbol() {
    let (ok, stdout, _) = run("show `a\n");
    assert!(ok);
    assert_eq!(stdout, "a\n");
}

#[test]
fn identity_form_over_a_tuple() {
    let (ok, stdout, _) = run("form id : X -> X\nshow id[(a b)]\n");
    assert!(ok);
    assert_eq!(stdout, "(a b)\n");
}

#[test]
fn swap_form_over_a_pair() {
    let (ok, stdout, _) = run("form swap : (A B) -> (B A)\nshow swap[(a b)]\n");
    assert!(ok);
    assert_eq!(stdout, "(b a)\n");
}

#[test]
fn unlinking_a_form_makes_later_calls_a_runtime_name_error() {
    let (ok, stdout, stderr) = run("form id : X -> X\nunlink id\nshow id[(a)]\n");
    assert!(!ok);
    assert_eq!(stdout, "");
    assert!(stderr.contains("id"));
}

#[test]
fn ctcall_to_iscomptime_bakes_true_into_the_rhs_template() {
    let (ok, stdout, _) = run("form ct : X -> _ISCOMPTIME`[X]\nshow ct[anything]\n");
    assert!(ok);
    assert_eq!(stdout, "TRUE\n");
}

#[test]
fn output_from_earlier_show_statements_survives_a_later_error() {
    let (ok, stdout, stderr) = run("show a\nshow nosuch[a]\n");
    assert!(!ok);
    assert_eq!(stdout, "a\n");
    assert!(!stderr.is_empty());
}

#[test]
fn a_lex_error_reports_location_and_exits_non_zero() {
    let (ok, _, stderr) = run("show a $\n");
    assert!(!ok);
    assert!(stderr.contains("1:"));
}

#[test]
fn verbose_flag_is_accepted() {
    let file = write_source("let x : a\nshow x\n");
    let output = Command::new(env!("CARGO_BIN_EXE_formrw"))
        .args(["-v", file.path().to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "a\n");
}

#[test]
fn missing_file_is_a_non_zero_exit_with_a_stderr_message() {
    let output = Command::new(env!("CARGO_BIN_EXE_formrw"))
        .arg("/no/such/file/for/formrw/tests")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());
}
