use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TABLE: &str = "\
USA Weightlifting National Championships
Event Age Gender Bodyweight QT
Junior U15 Male
53kg 120
59kg 135
Youth 13&U Female
40kg 60
Youth 13&U Female
40kg 65
";

fn write_input(dir: &TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

fn qtotals(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("qtotals").unwrap();
    // keep any user config out of the run
    cmd.env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .current_dir(dir.path());
    cmd
}

#[test]
fn extract_text_dump_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "table.txt", TABLE);

    qtotals(&dir)
        .args(["extract", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\n  \"Junior\": {\n    \"U15\": {"))
        .stdout(predicate::str::contains("\"weightClass\": \"59kg\""))
        .stdout(predicate::str::contains("\"qualifyingTotal\": \"65\"").not())
        .stderr(predicate::str::contains("duplicate weight class 40kg in Youth/U13/Female"));
}

#[test]
fn extract_typescript_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "table.txt", TABLE);
    let output = dir.path().join("qt_data.ts");

    qtotals(&dir)
        .args(["extract", input.to_str().unwrap(), "-f", "ts", "-o"])
        .arg(&output)
        .assert()
        .success();

    let ts = fs::read_to_string(&output).unwrap();
    assert!(ts.starts_with("export const qualifyingTotals = {"));
    assert!(ts.contains("export type QTWeightClass = typeof qualifyingTotals[QTEvent][QTAgeGroup][QTGender][number];"));
}

#[test]
fn extract_is_byte_identical_across_runs() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "table.txt", TABLE);

    let run = || {
        qtotals(&dir)
            .args(["extract", input.to_str().unwrap(), "-f", "csv"])
            .output()
            .unwrap()
            .stdout
    };

    let first = run();
    assert!(!first.is_empty());
    assert_eq!(first, run());
}

#[test]
fn zero_rows_fails_loudly() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "orphans.txt", "100+kg 250\n");
    let output = dir.path().join("qt_data.json");

    qtotals(&dir)
        .args(["extract", input.to_str().unwrap(), "-o"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no qualifying-total rows extracted"));

    assert!(!output.exists());
}

#[test]
fn strict_drops_unknown_age_groups() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "masters.txt",
        "Masters 35-39 Male\n61kg 150\nJunior U15 Male\n53kg 120\n",
    );

    qtotals(&dir)
        .args(["extract", input.to_str().unwrap(), "--strict", "-f", "csv"])
        .assert()
        .success()
        .stdout("event,ageGroup,gender,weightClass,qualifyingTotal\nJunior,U15,Male,53kg,120\n")
        .stderr(predicate::str::contains("row dropped, unknown age group \"35-39\""));
}

#[test]
fn unsupported_input_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "table.docx", TABLE);

    qtotals(&dir)
        .args(["extract", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format: docx"));
}

#[test]
fn explicit_config_file_is_used() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "table.txt", TABLE);
    let config = write_input(
        &dir,
        "config.json",
        r#"{ "output": { "format": "typescript", "const_name": "nationalsQt" } }"#,
    );

    qtotals(&dir)
        .args(["--config", config.to_str().unwrap(), "extract", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("export const nationalsQt = {"));
}

#[test]
fn config_subcommands_follow_global_config_flag() {
    let dir = TempDir::new().unwrap();
    let config = write_input(&dir, "mine.json", "{}");

    qtotals(&dir)
        .args(["--config", config.to_str().unwrap(), "config", "set", "output.const_name", "nationalsQt"])
        .assert()
        .success();

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(saved["output"]["const_name"], "nationalsQt");

    qtotals(&dir)
        .args(["--config", config.to_str().unwrap(), "config", "get", "output.const_name"])
        .assert()
        .success()
        .stdout("\"nationalsQt\"\n");

    qtotals(&dir)
        .args(["--config", config.to_str().unwrap(), "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mine.json"));
}

#[test]
fn fetch_rejects_invalid_config_before_downloading() {
    let dir = TempDir::new().unwrap();
    let config = write_input(&dir, "config.json", r#"{ "source": { "timeout_secs": 0 } }"#);
    let output = dir.path().join("qt_source.pdf");

    qtotals(&dir)
        .args(["--config", config.to_str().unwrap(), "fetch", "--url", "http://127.0.0.1:9/qt.pdf", "-o"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("source.timeout_secs must be positive"));

    assert!(!output.exists());
}

#[test]
fn scrape_rejects_bad_const_name_before_downloading() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("qt_data.ts");

    qtotals(&dir)
        .args(["scrape", "--url", "http://127.0.0.1:9/qt.pdf", "-f", "ts", "--const-name", "qualifying totals", "-o"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a valid identifier"));

    assert!(!output.exists());
}
