use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

const SETTINGS: &str = "; service settings\n\
                        [server]\n\
                        host = \"localhost\"\n\
                        port = 8080\n\
                        [features]\n\
                        beta = true\n";

#[test]
fn ini_prints_json_by_default() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "settings.ini", SETTINGS);

    let mut cmd = cargo_bin_cmd!("rdp");
    cmd.current_dir(dir.path()).arg("ini").arg(&path);

    cmd.assert().success().stdout(
        predicate::str::contains("\"server\"")
            .and(predicate::str::contains("\"port\": 8080"))
            .and(predicate::str::contains("\"beta\": true")),
    );
}

#[test]
fn ini_text_format_writes_ini_back() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "settings.ini", SETTINGS);

    let mut cmd = cargo_bin_cmd!("rdp");
    cmd.current_dir(dir.path())
        .arg("ini")
        .arg(&path)
        .arg("--format")
        .arg("text");

    cmd.assert().success().stdout(
        "[features]\nbeta = true\n[server]\nhost = \"localhost\"\nport = 8080\n",
    );
}

#[test]
fn ini_yaml_format() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "settings.ini", SETTINGS);

    let mut cmd = cargo_bin_cmd!("rdp");
    cmd.current_dir(dir.path())
        .args(["ini", "--format", "yaml"])
        .arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("server:").and(predicate::str::contains("port: 8080")));
}

#[test]
fn ini_parse_error_is_rendered_and_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "broken.ini", "[server]\nport 8080\n");

    let mut cmd = cargo_bin_cmd!("rdp");
    cmd.current_dir(dir.path()).arg("ini").arg(&path);

    cmd.assert().failure().code(1).stderr(
        predicate::str::contains("broken.ini:2:6: error: Expected: '='")
            .and(predicate::str::contains("port 8080\n     ^")),
    );
}

#[test]
fn missing_input_file_fails() {
    let dir = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("rdp");
    cmd.current_dir(dir.path()).args(["scan", "nope.txt"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn scan_lists_tokens_with_offsets() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "input.txt", "mask = 0xFF ; comment\nflags = [0b101, true]\n");

    let mut cmd = cargo_bin_cmd!("rdp");
    cmd.current_dir(dir.path())
        .arg("scan")
        .arg(&path)
        .args(["--format", "text"]);

    cmd.assert().success().stdout(
        predicate::str::contains("     7 hexadecimal  0xFF")
            .and(predicate::str::contains("binary       0b101"))
            .and(predicate::str::contains("boolean      true"))
            .and(predicate::str::contains("comment").not()),
    );
}

#[test]
fn local_config_file_is_picked_up() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "rdp.toml", "[literals]\nhex_prefix = \"#\"\n[scan]\ncomment_marker = \"//\"\n");
    let path = write_file(&dir, "input.txt", "#ff // note\n");

    let mut cmd = cargo_bin_cmd!("rdp");
    cmd.current_dir(dir.path()).arg("scan").arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"hexadecimal\"").and(predicate::str::contains("note").not()));
}

#[test]
fn explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "input.txt", "x\n");

    let mut cmd = cargo_bin_cmd!("rdp");
    cmd.current_dir(dir.path())
        .arg("scan")
        .arg(&path)
        .args(["--config", "missing.toml"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn rejects_unknown_format_flag() {
    let mut cmd = cargo_bin_cmd!("rdp");
    cmd.args(["ini", "x.ini", "--format", "xml"]);
    cmd.assert().failure();
}
