use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const LEGACY_CARD: &str = "RÉPUBLIQUE FRANÇAISE CARTE NATIONALE D'IDENTITÉ N°: 880692310285\n\
                           Nom: DUPONT Prénom(s): Jean, Pierre Sexe: M\n\
                           Né(e) le: 12.03.1985 à: LYON (69)\n\
                           Valable jusqu'au 11.03.2030\n";

/// Command isolated from the user's configuration directory.
fn docfield(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("docfield").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path()).env("HOME", home.path());
    cmd
}

#[test]
fn test_schema_lists_document_types() {
    let home = TempDir::new().unwrap();
    docfield(&home)
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("identity"))
        .stdout(predicate::str::contains("bank_statement"));
}

#[test]
fn test_schema_shows_fields() {
    let home = TempDir::new().unwrap();
    docfield(&home)
        .args(["schema", "payslip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("grossSalary"))
        .stdout(predicate::str::contains("socialSecurityNumber"));
}

#[test]
fn test_schema_rejects_unknown_type() {
    let home = TempDir::new().unwrap();
    docfield(&home)
        .args(["schema", "passport"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown document type: passport"));
}

#[test]
fn test_extract_from_text_json() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("card.txt");
    fs::write(&input, LEGACY_CARD).unwrap();

    let output = docfield(&home)
        .args(["extract", "--type", "identity", "--from-text", "--format", "json"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["document_type"], "identity");

    let fields = json["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 7);
    let last_name = fields.iter().find(|f| f["field"] == "lastName").unwrap();
    assert_eq!(last_name["value"], "DUPONT");
}

#[test]
fn test_extract_from_text_csv_to_file() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("card.txt");
    let output = home.path().join("card.csv");
    fs::write(&input, LEGACY_CARD).unwrap();

    docfield(&home)
        .args(["extract", "-t", "identity", "--from-text", "-f", "csv", "-o"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("field,value,confidence,alternatives"));
    assert!(csv.contains("documentNumber,880692310285"));
}

#[test]
fn test_extract_rejects_unsupported_file() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("notes.txt");
    fs::write(&input, "not a scan").unwrap();

    docfield(&home)
        .args(["extract", "--type", "identity"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported file format"));
}

#[test]
fn test_extract_missing_input() {
    let home = TempDir::new().unwrap();
    docfield(&home)
        .args(["extract", "--type", "identity", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_config_init_and_get() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("docfield.json");

    docfield(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    docfield(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "rasterizer.max_pages", "2"])
        .assert()
        .success();

    docfield(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "rasterizer.max_pages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2"));
}

#[test]
fn test_config_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    docfield(&home)
        .args(["config", "get", "ocr.threshold"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn test_config_path() {
    let home = TempDir::new().unwrap();
    docfield(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"))
        .stdout(predicate::str::contains("not created"));
}
