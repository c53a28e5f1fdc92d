use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const SAMPLE: &str = "tests/fixtures/httpd.conf";

fn blockconf() -> Command {
    Command::cargo_bin("blockconf").expect("binary to build")
}

#[test]
fn render_defaults_to_block_format() {
    blockconf()
        .args(["render", SAMPLE])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Directory /\n"))
        .stdout(predicate::str::contains(
            "<IfModule log_config_module>\n    IfModule logio_module\n</IfModule>\n",
        ));
}

#[test]
fn render_json_format() {
    let output = blockconf()
        .args(["render", SAMPLE, "--format", "json"])
        .output()
        .expect("command to run");

    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf-8 output");
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");
    assert_eq!(value["ServerRoot"], "/usr/local/apache");
}

#[test]
fn render_unknown_format_fails() {
    blockconf()
        .args(["render", SAMPLE, "-f", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Format 'yaml' not found"));
}

#[test]
fn find_prints_first_match() {
    blockconf()
        .args(["find", SAMPLE, "/Directory"])
        .assert()
        .success()
        .stdout("Directory /\n");
}

#[test]
fn find_all_prints_every_match() {
    blockconf()
        .args(["find", SAMPLE, "Directory", "--all"])
        .assert()
        .success()
        .stdout("Directory /\nDirectory \"/share/Qweb\"\n");
}

#[test]
fn find_all_json_prints_one_array() {
    let output = blockconf()
        .args(["find", SAMPLE, "Directory", "--all", "--format", "json"])
        .output()
        .expect("command to run");

    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf-8 output");
    let value: serde_json::Value = serde_json::from_str(&text).expect("one JSON document");
    let items = value.as_array().expect("array of matches");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["attributes"][0], "/");
    assert_eq!(items[1]["attributes"][0], "\"/share/Qweb\"");
}

#[test]
fn find_without_match_fails() {
    blockconf()
        .args(["find", SAMPLE, "/VirtualHost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no node matches '/VirtualHost'"));
}

#[test]
fn mismatched_close_reports_line() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("broken.conf");
    fs::write(&path, "<Directory />\n    Deny from all\n</Location>\n").expect("write config");

    blockconf()
        .arg("render")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3"))
        .stderr(predicate::str::contains("section mismatch"));
}

#[test]
fn missing_file_fails() {
    blockconf()
        .args(["render", "tests/fixtures/does-not-exist.conf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.conf"));
}

#[test]
fn config_file_changes_rendering() {
    let dir = tempdir().expect("temp dir");
    let config = dir.path().join("blockconf.toml");
    fs::write(&config, "[render]\nindent = \"  \"\n").expect("write config");

    blockconf()
        .args(["render", SAMPLE])
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("<IfModule log_config_module>\n  IfModule logio_module\n"));
}

#[test]
fn strict_config_rejects_unclosed_sections() {
    let dir = tempdir().expect("temp dir");
    let config = dir.path().join("strict.toml");
    fs::write(&config, "[parse]\nreject_unclosed_sections = true\n").expect("write config");
    let source = dir.path().join("open.conf");
    fs::write(&source, "<Directory />\n    Deny from all\n").expect("write source");

    blockconf()
        .arg("render")
        .arg(&source)
        .arg("-c")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Directory"));

    blockconf()
        .arg("render")
        .arg(&source)
        .assert()
        .success()
        .stdout("Directory /\n");
}

#[test]
fn list_formats_shows_builtins() {
    blockconf()
        .arg("list-formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("block"))
        .stdout(predicate::str::contains("json"));
}
