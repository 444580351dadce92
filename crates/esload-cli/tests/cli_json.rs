//! Integration tests for `esload --json` output.
//!
//! These tests verify:
//! - Each command prints exactly one valid JSON object
//! - Classification, resolution and load results match the library
//! - Invalid configs exit non-zero with a message naming the key

use std::process::{Command, Output};
use tempfile::tempdir;

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-q", "-p", "esload-cli", "--bin", "esload", "--"]);
    cmd
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let output = cargo_bin()
        .arg("--json")
        .args(args)
        .output()
        .expect("Failed to run esload");
    assert!(
        output.status.success(),
        "esload {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    parse_stdout(&output)
}

fn parse_stdout(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

#[test]
fn test_media_type_with_content_type() {
    let json = run_json(&[
        "media-type",
        "https://example.com/x.ts",
        "--content-type",
        "application/typescript; charset=utf-8",
    ]);
    assert_eq!(json["media_type"], "TypeScript");
    assert_eq!(json["loader"], "ts");
}

#[test]
fn test_media_type_without_loader() {
    let json = run_json(&["media-type", "https://example.com/x.d.ts"]);
    assert_eq!(json["media_type"], "Dts");
    assert!(json["loader"].is_null());
}

#[test]
fn test_resolution_round_trip() {
    let json = run_json(&["resolution", "https://deno.land/x/mod.ts"]);
    assert_eq!(json["namespace"], "https");
    assert_eq!(json["path"], "//deno.land/x/mod.ts");

    let json = run_json(&["url", "https", "//deno.land/x/mod.ts"]);
    assert_eq!(json["url"], "https://deno.land/x/mod.ts");
}

#[test]
fn test_load_json_module() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("data.json"), r#"{"a": [1, 2]}"#).unwrap();

    let cwd = dir.path().to_string_lossy().to_string();
    let json = run_json(&["--cwd", &cwd, "load", "data.json"]);

    assert_eq!(json["loader"], "js");
    assert_eq!(json["resolution"]["kind"], "esm");
    assert_eq!(
        json["contents"],
        "export default {\n  \"a\": [\n    1,\n    2\n  ]\n};"
    );
}

#[test]
fn test_config_discovered_in_cwd() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("deno.jsonc"),
        "{\n  // mappings\n  \"imports\": { \"preact\": \"npm:preact@10\" },\n  \"lock\": \"deno.lock\",\n}\n",
    )
    .unwrap();

    let cwd = dir.path().to_string_lossy().to_string();
    let json = run_json(&["--cwd", &cwd, "config"]);

    assert_eq!(json["config"]["imports"]["preact"], "npm:preact@10");
    assert_eq!(json["config"]["lock"], "deno.lock");
}

#[test]
fn test_config_invalid_shape_fails() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("deno.json"), r#"{"imports": []}"#).unwrap();

    let output = cargo_bin()
        .arg("--cwd")
        .arg(dir.path())
        .args(["config", "deno.json"])
        .output()
        .expect("Failed to run esload");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"imports\""), "stderr: {stderr}");
}

#[test]
fn test_media_type_npm_specifier() {
    let json = run_json(&["media-type", "npm:@preact/signals@1.2.1/dist"]);
    assert_eq!(json["media_type"], "Unknown");
    assert_eq!(json["npm"]["name"], "@preact/signals");
    assert_eq!(json["npm"]["version"], "1.2.1");
    assert_eq!(json["npm"]["path"], "/dist");
    assert!(json.get("jsr").is_none());
}

#[test]
fn test_resolution_node_modules_flag() {
    let dir = tempdir().unwrap();
    let cwd = dir.path().to_string_lossy().to_string();
    let json = run_json(&["--cwd", &cwd, "resolution", "node_modules/preact/index.js"]);
    assert_eq!(json["namespace"], "file");
    assert_eq!(json["in_node_modules"], true);
}
