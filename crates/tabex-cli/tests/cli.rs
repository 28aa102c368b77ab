//! Integration tests for the tabex CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A CLI command isolated from the user's configuration.
fn cli(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tabex"));
    cmd.env("XDG_CONFIG_HOME", home).env("HOME", home);
    cmd
}

fn word(text: &str, x: f64, y: f64) -> Value {
    json!({
        "symbols": [{ "text": text }],
        "boundingBox": { "vertices": [
            { "x": x, "y": y },
            { "x": x + 40.0, "y": y },
            { "x": x + 40.0, "y": y + 12.0 },
            { "x": x, "y": y + 12.0 }
        ]},
        "confidence": 0.9
    })
}

fn manifest() -> Value {
    let words = vec![
        word("No", 10.0, 10.0),
        word("Item", 50.0, 10.0),
        word("Qty", 300.0, 10.0),
        word("pcs", 300.0, 60.0),
        word("1", 10.0, 110.0),
        word("Gear", 50.0, 110.0),
        word("4", 300.0, 110.0),
        word("TOTAL", 10.0, 160.0),
        word("4", 300.0, 160.0),
    ];

    json!({
        "success": true,
        "fileName": "manifest.pdf",
        "tableData": {
            "success": true,
            "documentStructure": {
                "pages": [{ "blocks": [{
                    "blockType": "TABLE",
                    "paragraphs": [{ "words": words }]
                }] }]
            }
        }
    })
}

fn write_json(dir: &Path, name: &str, value: &Value) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path
}

#[test]
fn test_extract_table_json() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "manifest.json", &manifest());

    let output = cli(dir.path())
        .arg("extract")
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["status"], "table");
    assert_eq!(result["data"]["products"][0]["name"], "Gear");
    assert_eq!(result["data"]["products"].as_array().unwrap().len(), 1);
    assert_eq!(result["data"]["summary"]["product_names_count"], 1);
    assert_eq!(result["data"]["commodity_column"]["header_text"], "Item");
    assert_eq!(result["data"]["commodity_column"]["column_index"], 1);
}

#[test]
fn test_extract_aligned_csv() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "manifest.json", &manifest());

    cli(dir.path())
        .args(["extract", "-f", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("product_name,table_index,row_index"))
        .stdout(predicate::str::contains("Gear,0,0"));

    // "No" and "Item" start within one column gap and share a span.
    cli(dir.path())
        .args(["extract", "-f", "csv", "--addressing", "aligned"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 Gear,0,0"));
}

#[test]
fn test_extract_plain_text() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("manifest.txt");
    fs::write(
        &input,
        "Description of goods\nSteel bolts 500 pcs 120 kg $340.00\nTotal $340.00\n",
    )
    .unwrap();

    cli(dir.path())
        .args(["extract", "-f", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Commodities (1):"))
        .stdout(predicate::str::contains(
            "Steel [qty 500 pcs, weight 120 kg, price 340.00 USD]",
        ));
}

#[test]
fn test_extract_failed_ocr() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "failed.json", &json!({ "success": false }));

    cli(dir.path())
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"failure\""))
        .stdout(predicate::str::contains("input_missing"))
        .stderr(predicate::str::contains("no valid result"));
}

#[test]
fn test_extract_missing_input() {
    let dir = TempDir::new().unwrap();

    cli(dir.path())
        .args(["extract", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_extract_fallback_to_text() {
    let dir = TempDir::new().unwrap();
    let input = write_json(
        dir.path(),
        "empty.json",
        &json!({
            "success": true,
            "fullText": "Qty: 12 pcs\nWeight: 5.5 kg\nPrice: $20.00",
            "tableData": { "success": true, "documentStructure": { "pages": [] } }
        }),
    );

    cli(dir.path())
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("structure_absent"));

    let output = cli(dir.path())
        .args(["extract", "--fallback-to-text"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["status"], "text");
    assert_eq!(result["data"]["summary"]["total_quantities"], 1);
    assert_eq!(result["data"]["summary"]["total_weights"], 1);
    assert_eq!(result["data"]["summary"]["total_prices"], 1);
}

#[test]
fn test_batch_with_summary() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("inputs");
    let out = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();

    write_json(&inputs, "manifest.json", &manifest());
    write_json(&inputs, "failed.json", &json!({ "success": false }));
    fs::write(inputs.join("broken.json"), "{ not json").unwrap();

    let pattern = format!("{}/*.json", inputs.display());

    cli(dir.path())
        .args(["batch", &pattern, "--summary", "--continue-on-error", "-j", "2", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files"));

    assert!(out.join("manifest.json").exists());
    assert!(out.join("failed.json").exists());
    assert!(!out.join("broken.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,path"));
    assert!(summary.contains("manifest.json,success,table,1,4,true,1"));
    assert!(summary.contains("failed.json,failure"));
    assert!(summary.contains("broken.json,error"));
}

#[test]
fn test_batch_stops_on_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    let pattern = format!("{}/*.json", dir.path().display());

    cli(dir.path())
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn test_config_roundtrip() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("tabex.json");
    let config = config.to_str().unwrap();

    cli(dir.path())
        .args(["-c", config, "config", "init"])
        .assert()
        .success();

    cli(dir.path())
        .args(["-c", config, "config", "get", "table.column_addressing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("positional"));

    cli(dir.path())
        .args(["-c", config, "config", "set", "table.column_addressing", "aligned"])
        .assert()
        .success();

    cli(dir.path())
        .args(["-c", config, "config", "get", "table.column_addressing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aligned"));

    cli(dir.path())
        .args(["-c", config, "config", "set", "table.no_such_key", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));

    cli(dir.path())
        .args(["-c", config, "config", "set", "text.match_confidence", "2.5"])
        .assert()
        .failure();
}

#[test]
fn test_config_drives_extraction() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "manifest.json", &manifest());
    let config = dir.path().join("tabex.json");
    fs::write(&config, r#"{"table": {"column_addressing": "aligned"}}"#).unwrap();

    cli(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["extract", "-f", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 Gear,0,0"));
}
