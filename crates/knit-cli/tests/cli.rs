//! End-to-end runs of the `knit` binary against a project on disk.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// The library checked out under `graphql/`, the bundling package at the root.
fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        "graphql/package.json",
        r#"{"name": "graphql", "version": "0.10.1", "dependencies": {"iterall": "1.1.1"}}"#,
    );
    write(
        root,
        "package.json",
        r#"{
            "name": "graphql-rxjs",
            "dependencies": {"graphql": "^0.10.1", "iterall": "^1.1.1", "rxjs": "^5.4.0"}
        }"#,
    );
    write(
        root,
        "graphql/.babelrc",
        r#"{
            "presets": [["env", {"targets": {"node": 4}}]],
            "plugins": [
                "./resources/inline-invariant",
                "syntax-async-functions",
                "transform-flow-strip-types"
            ]
        }"#,
    );
    write(root, "src/index.js", "export * from './reactive';\n");
    temp
}

fn knit(root: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("knit");
    cmd.env_remove("RUST_LOG").arg("--no-color").current_dir(root);
    cmd
}

fn compose_json(root: &Path, extra: &[&str]) -> Value {
    let output = knit(root)
        .arg("compose")
        .args(extra)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).unwrap()
}

fn pass_names(config: &Value) -> Vec<String> {
    config["plugins"]
        .as_array()
        .unwrap()
        .iter()
        .map(|pass| pass["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_compose_production_to_stdout() {
    let temp = project();
    let config = compose_json(temp.path(), &[]);

    assert_eq!(config["input"], json!("src/index.js"));
    assert_eq!(config["output"]["format"], json!("cjs"));
    assert_eq!(
        pass_names(&config),
        [
            "filesize",
            "progress",
            "node-resolve",
            "commonjs",
            "babel",
            "strip",
            "cleanup",
            "uglify"
        ]
    );
    assert_eq!(config["external"][0], json!("iterall"));
    assert_eq!(config["external"][1], json!("graphql"));
    assert_eq!(config["external"][2], json!("rxjs"));
}

#[test]
fn test_compose_babel_plugins_are_resolved() {
    let temp = project();
    let config = compose_json(temp.path(), &["--compact"]);
    let babel = &config["plugins"][4]["options"];

    assert_eq!(babel["babelrc"], json!(false));
    assert_eq!(babel["runtimeHelpers"], json!(true));
    assert_eq!(babel["presets"][0][1]["modules"], json!(false));

    let plugins = babel["plugins"].as_array().unwrap();
    assert!(
        plugins[0][0]
            .as_str()
            .unwrap()
            .ends_with("babel-plugin-transform-import-duplicate")
    );
    assert!(plugins[0][1]["external"].is_array());
    assert!(
        plugins[1]
            .as_str()
            .unwrap()
            .ends_with("graphql/resources/inline-invariant")
    );
    assert_eq!(plugins[2], json!("syntax-async-functions"));
    assert_eq!(plugins.last().unwrap(), &json!("external-helpers"));
}

#[test]
fn test_compose_debug_flag_drops_minification() {
    let temp = project();
    let config = compose_json(temp.path(), &["--debug"]);
    assert_eq!(
        pass_names(&config),
        ["filesize", "progress", "node-resolve", "commonjs", "babel"]
    );
}

#[test]
fn test_compose_debug_from_environment() {
    let temp = project();
    let output = knit(temp.path())
        .env("KNIT_DEBUG", "true")
        .arg("compose")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let config: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(pass_names(&config).len(), 5);
}

#[test]
fn test_compose_writes_out_file() {
    let temp = project();
    knit(temp.path())
        .args(["compose", "--out", "build/rollup.json"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("build/rollup.json"));

    let written = fs::read_to_string(temp.path().join("build/rollup.json")).unwrap();
    let config: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(config["input"], json!("src/index.js"));
}

#[test]
fn test_compose_uses_root_flag() {
    let temp = project();
    let elsewhere = TempDir::new().unwrap();
    knit(elsewhere.path())
        .arg("compose")
        .arg("--root")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"external-helpers\""));
}

#[test]
fn test_compose_warns_on_drift() {
    let temp = project();
    write(
        temp.path(),
        "graphql/.babelrc",
        r#"{"plugins": ["syntax-async-functions"]}"#,
    );

    knit(temp.path())
        .arg("compose")
        .assert()
        .success()
        .stderr(predicate::str::contains("./resources/inline-invariant"));
}

#[test]
fn test_compose_malformed_manifest_fails_without_output() {
    let temp = project();
    write(temp.path(), "package.json", "{\"dependencies\": [");

    knit(temp.path())
        .args(["compose", "--out", "rollup.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed manifest"));

    assert!(!temp.path().join("rollup.json").exists());
}

#[test]
fn test_compose_rejects_unknown_replacement_key() {
    let temp = project();
    write(
        temp.path(),
        "knit.toml",
        "[replacements]\n\"transform-import-dedupe\" = \"plugins/dedupe\"\n",
    );

    knit(temp.path())
        .arg("compose")
        .assert()
        .failure()
        .stderr(predicate::str::contains("transform-import-dedupe"));
}

#[test]
fn test_compose_settings_from_package_json_field() {
    let temp = project();
    write(
        temp.path(),
        "package.json",
        r#"{
            "name": "graphql-rxjs",
            "dependencies": {"rxjs": "^5.4.0"},
            "knit": {"output": {"file": "lib/index.js"}, "deep_imports": []}
        }"#,
    );

    let config = compose_json(temp.path(), &[]);
    assert_eq!(config["output"]["file"], json!("lib/index.js"));
    assert_eq!(config["external"], json!(["iterall", "rxjs"]));
}

#[test]
fn test_externals_lists_one_per_line() {
    let temp = project();
    write(temp.path(), "knit.toml", "deep_imports = [\"rxjs/Observable\", \"rxjs\"]\n");

    knit(temp.path())
        .arg("externals")
        .assert()
        .success()
        .stdout("iterall\ngraphql\nrxjs\nrxjs/Observable\n");
}

#[test]
fn test_check_passes_on_complete_project() {
    let temp = project();
    knit(temp.path())
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("Settings are valid"));
}

#[test]
fn test_check_reports_missing_compiler_config() {
    let temp = project();
    fs::remove_file(temp.path().join("graphql/.babelrc")).unwrap();

    knit(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("compiler config not found"));
}

#[test]
fn test_check_strict_fails_on_drift() {
    let temp = project();
    write(
        temp.path(),
        "graphql/.babelrc",
        r#"{"plugins": ["syntax-async-functions"]}"#,
    );

    knit(temp.path()).arg("check").assert().success();
    knit(temp.path())
        .args(["check", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("matched no plugin"));
}

#[test]
fn test_settings_prints_effective_toml() {
    let temp = project();
    write(temp.path(), "knit.toml", "entry = \"lib/main.js\"\n");

    knit(temp.path())
        .arg("settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("entry = \"lib/main.js\""))
        .stdout(predicate::str::contains("compiler_config = \"graphql/.babelrc\""));
}

#[test]
fn test_missing_explicit_config_fails() {
    let temp = project();
    knit(temp.path())
        .args(["compose", "--config", "ci.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ci.toml"));
}

#[test]
fn test_no_color_keeps_status_lines_plain() {
    let temp = project();
    knit(temp.path())
        .env("FORCE_COLOR", "1")
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("Checking settings"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_no_color_env_keeps_piped_output_plain() {
    let temp = project();
    let mut cmd = cargo_bin_cmd!("knit");
    cmd.env_remove("RUST_LOG")
        .env_remove("FORCE_COLOR")
        .env("NO_COLOR", "1")
        .current_dir(temp.path())
        .args(["compose", "--out", "rollup.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("rollup.json"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_narrowed_replacement_table_passes_strict_check() {
    let temp = project();
    write(
        temp.path(),
        "graphql/.babelrc",
        r#"{"plugins": ["syntax-async-functions"]}"#,
    );
    write(
        temp.path(),
        "knit.toml",
        "[replacements]\n\"transform-import-duplicate\" = \"babel-plugin-transform-import-duplicate\"\n",
    );

    knit(temp.path())
        .args(["check", "--strict"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Every replacement table entry is in use"));
}

#[test]
fn test_compose_out_directory_is_rejected() {
    let temp = project();
    fs::create_dir_all(temp.path().join("build")).unwrap();

    knit(temp.path())
        .args(["compose", "--out", "build"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is a directory"));
}
