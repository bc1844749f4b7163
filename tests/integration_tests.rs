//! Integration tests for the wordfreq CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Command isolated from the caller's user config
fn wordfreq(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wordfreq").unwrap();
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

fn write_corpus(dir: &Path) {
    fs::write(dir.join("one.txt"), "a b a").unwrap();
    fs::write(dir.join("two.txt"), "b c").unwrap();
    fs::write(dir.join("three.txt"), "a").unwrap();
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    let temp_dir = TempDir::new().unwrap();
    wordfreq(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Count word frequencies"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    let temp_dir = TempDir::new().unwrap();
    wordfreq(temp_dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wordfreq"));
}

/// Test invalid subcommand shows error
#[test]
fn test_invalid_subcommand() {
    let temp_dir = TempDir::new().unwrap();
    wordfreq(temp_dir.path())
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_count_text_report() {
    let temp_dir = TempDir::new().unwrap();
    write_corpus(temp_dir.path());

    wordfreq(temp_dir.path())
        .current_dir(temp_dir.path())
        .args(["count", ".", "--no-progress", "--top", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EXECUTION INFO"))
        .stdout(predicate::str::contains("[a=3, b=2]"))
        .stdout(predicate::str::contains("[c=1, b=2]"))
        .stdout(predicate::str::contains("SEQUENTIAL average"))
        .stdout(predicate::str::contains("PARALLEL average"))
        .stdout(predicate::str::contains("identical counts"));
}

#[test]
fn test_count_json_report() {
    let temp_dir = TempDir::new().unwrap();
    write_corpus(temp_dir.path());

    let assert = wordfreq(temp_dir.path())
        .current_dir(temp_dir.path())
        .args(["count", ".", "--format", "json", "--runs", "2", "--file-size", "4"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let records = report["records"].as_array().unwrap();
    assert_eq!(records.len(), 4);
    let ids: Vec<u64> = records.iter().map(|r| r["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(records[0]["mode"], "SEQUENTIAL");
    assert_eq!(records[1]["mode"], "PARALLEL");
    assert_eq!(records[0]["file_count"], 3);
    assert_eq!(records[0]["file_size_kb"], 4);
    assert_eq!(records[0]["top_words"][0]["word"], "a");
    assert_eq!(records[0]["top_words"][0]["count"], 3);
    assert_eq!(records[0]["top_words"], records[1]["top_words"]);

    let modes = report["summary"]["modes"].as_array().unwrap();
    assert_eq!(modes.len(), 2);
    assert_eq!(modes[0]["runs"], 2);
    assert_eq!(modes[1]["runs"], 2);
}

#[test]
fn test_count_single_mode_yaml() {
    let temp_dir = TempDir::new().unwrap();
    write_corpus(temp_dir.path());

    wordfreq(temp_dir.path())
        .current_dir(temp_dir.path())
        .args(["count", "one.txt", "--mode", "parallel", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mode: PARALLEL"))
        .stdout(predicate::str::contains("file_count: 1"))
        .stdout(predicate::str::contains("runs: 0"));
}

#[test]
fn test_count_missing_path_fails() {
    let temp_dir = TempDir::new().unwrap();
    wordfreq(temp_dir.path())
        .current_dir(temp_dir.path())
        .args(["count", "missing.txt", "--no-progress"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn test_count_rejects_oversized_top_even_when_quiet() {
    let temp_dir = TempDir::new().unwrap();
    write_corpus(temp_dir.path());

    wordfreq(temp_dir.path())
        .current_dir(temp_dir.path())
        .args(["-q", "count", ".", "--top", "6"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("counter.top_words must be between 1 and 5"));
}

#[test]
fn test_generate_count_clean_cycle() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().join("text");
    fs::create_dir(&base).unwrap();
    fs::write(base.join("TextFile_1.txt"), "lorem ipsum dolor").unwrap();
    fs::write(base.join("TextFile_2.txt"), "ipsum sit amet").unwrap();

    wordfreq(temp_dir.path())
        .current_dir(temp_dir.path())
        .args(["generate", "--files", "4", "--size", "8", "--seed", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 4 working files"));
    assert!(base.join("TextFile_4_tmp.txt").exists());

    let assert = wordfreq(temp_dir.path())
        .current_dir(temp_dir.path())
        .args(["count", "--format", "json"])
        .assert()
        .success();
    let report: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["records"][0]["file_count"], 4);
    assert_eq!(report["records"][0]["file_size_kb"], 256);

    wordfreq(temp_dir.path())
        .current_dir(temp_dir.path())
        .args(["clean"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 4 working files"));
    assert!(!base.join("TextFile_1_tmp.txt").exists());
    assert!(base.join("TextFile_1.txt").exists());
}

#[test]
fn test_config_show_and_env_override() {
    let temp_dir = TempDir::new().unwrap();
    wordfreq(temp_dir.path())
        .current_dir(temp_dir.path())
        .env("WORDFREQ_COUNTER__TOP_WORDS", "3")
        .args(["config", "show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"top_words\": 3"))
        .stdout(predicate::str::contains("\"base_file_kb\": 4"));
}

#[test]
fn test_repository_config_and_missing_custom_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("wordfreq.toml"),
        "[corpus]\nworking_dir = \"work\"\n",
    )
    .unwrap();

    wordfreq(temp_dir.path())
        .current_dir(temp_dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("working_dir = \"work\""));

    wordfreq(temp_dir.path())
        .current_dir(temp_dir.path())
        .args(["--config", "nope.toml", "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_invalid_config_rejected() {
    let temp_dir = TempDir::new().unwrap();
    wordfreq(temp_dir.path())
        .current_dir(temp_dir.path())
        .env("WORDFREQ_COUNTER__THREAD_PERCENTAGE", "0")
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("thread_percentage"));
}
