use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    path.to_string_lossy().into_owned()
}

#[test]
fn compiles_single_file_to_html_on_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "deck.cram", "<+alpha\n---Def\nhello\n/+>\n");

    let mut cmd = cargo_bin_cmd!("cram");
    cmd.arg(&input);

    cmd.assert().success().stdout(
        predicate::str::contains("<!DOCTYPE html>")
            .and(predicate::str::contains(r#"id="card-alpha""#)),
    );
}

#[test]
fn cross_file_links_resolve_across_inputs() {
    let dir = TempDir::new().unwrap();
    let first = write_file(&dir, "a.cram", "<+alpha\n(>: #beta)\n/+>\n");
    let second = write_file(&dir, "b.cram", "<+beta\n/+>\n");

    let mut cmd = cargo_bin_cmd!("cram");
    cmd.arg(&first).arg(&second);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r##"<a href="#card-beta">#beta</a>"##));
}

#[test]
fn error_diagnostics_set_exit_status() {
    let dir = TempDir::new().unwrap();
    let first = write_file(&dir, "a.cram", "<+dup\n/+>\n");
    let second = write_file(&dir, "b.cram", "<+dup\n/+>\n");

    let mut cmd = cargo_bin_cmd!("cram");
    cmd.arg(&first).arg(&second);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("duplicate-topic-id"));
}

#[test]
fn warnings_alone_keep_exit_status_zero() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "deck.cram", "<+alpha\n(>: #missing)\n/+>\n");

    let mut cmd = cargo_bin_cmd!("cram");
    cmd.arg(&input);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("dangling-link-target"));
}

#[test]
fn check_mode_writes_no_output() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "deck.cram", "<+alpha\n/+>\n");

    let mut cmd = cargo_bin_cmd!("cram");
    cmd.arg(&input).arg("--check");

    cmd.assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn json_format_emits_the_forest() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "deck.cram", "<+alpha\n---Def\nx\n/+>\n");

    let mut cmd = cargo_bin_cmd!("cram");
    cmd.arg(&input).arg("--format").arg("json");

    cmd.assert().success().stdout(
        predicate::str::contains(r#""documents""#).and(predicate::str::contains(r#""alpha""#)),
    );
}

#[test]
fn output_flag_writes_file() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "deck.cram", "<+alpha\n/+>\n");
    let out = dir.path().join("deck.html");

    let mut cmd = cargo_bin_cmd!("cram");
    cmd.arg(&input).arg("-o").arg(&out);

    cmd.assert().success().stdout(predicate::str::is_empty());
    let html = fs::read_to_string(&out).expect("output file written");
    assert!(html.contains(r#"id="card-alpha""#));
}

#[test]
fn config_file_switches_theme_and_strictness() {
    let dir = TempDir::new().unwrap();
    let config = write_file(
        &dir,
        "cram.toml",
        "[html]\ntheme = \"dark\"\n\n[grammar]\nlenient_card_close = false\n",
    );
    let input = write_file(&dir, "deck.cram", "<+alpha\n---Def\nx\n/+\n");

    let mut cmd = cargo_bin_cmd!("cram");
    cmd.arg(&input).arg("--config").arg(&config);

    // With leniency off the bare /+ never closes the card.
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unclosed-card"));
}

#[test]
fn unknown_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "deck.cram", "<+alpha\n/+>\n");

    let mut cmd = cargo_bin_cmd!("cram");
    cmd.arg(&input).arg("--format").arg("pdf");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn missing_input_file_reports_path() {
    let mut cmd = cargo_bin_cmd!("cram");
    cmd.arg("no-such-file.cram");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no-such-file.cram"));
}
