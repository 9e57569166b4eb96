use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn cli() -> Command {
    Command::new(assert_cmd::cargo_bin!("drawsym-cli"))
}

#[test]
fn extract_then_generate_round_trip() {
    let root = repo_root();
    let tmp = tempfile::tempdir().expect("tempdir");
    let symbols = tmp.path().join("symbols.json");
    let out = tmp.path().join("out.drawio.xml");

    let assert = cli()
        .args([
            "extract",
            "--assets",
            root.join("fixtures").join("assets").to_string_lossy().as_ref(),
            "--out",
            symbols.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.starts_with("Extracted 10 symbols to "), "{stdout}");
    assert!(symbols.exists());

    let input = root.join("fixtures").join("input").join("order_process.json");
    let assert = cli()
        .args([
            "generate",
            "--symbols",
            symbols.to_string_lossy().as_ref(),
            input.to_string_lossy().as_ref(),
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("Generated BPMN diagram at"), "{stdout}");

    let xml = fs::read_to_string(&out).expect("read output");
    let doc = roxmltree::Document::parse(&xml).expect("valid xml");
    assert_eq!(doc.root_element().tag_name().name(), "mxfile");
    let edges = doc
        .descendants()
        .filter(|n| n.attribute("edge") == Some("1"))
        .count();
    assert_eq!(edges, 2);
}

#[test]
fn extract_uses_fixed_paths_by_default() {
    let tmp = tempfile::tempdir().expect("tempdir");
    // No `assets` directory: the registry still gets written with templates only.
    cli().current_dir(tmp.path()).assert().success();

    let text = fs::read_to_string(tmp.path().join("symbols.json")).expect("symbols.json");
    assert!(text.contains("\"templates\""));
    assert!(text.contains("\"lane\""));
}

#[test]
fn generate_without_registry_fails() {
    let root = repo_root();
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = root.join("fixtures").join("input").join("order_process.json");
    let out = tmp.path().join("out.xml");

    let assert = cli()
        .current_dir(tmp.path())
        .args([
            "generate",
            input.to_string_lossy().as_ref(),
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("not found"), "{stderr}");
    assert!(!out.exists());
}

#[test]
fn generate_with_missing_input_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");
    fs::write(tmp.path().join("symbols.json"), r#"{"templates": {}, "modifiers": {}}"#)
        .expect("write symbols");

    cli()
        .current_dir(tmp.path())
        .args(["generate", "missing.json", "out.xml"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn generate_requires_two_paths() {
    cli().args(["generate", "only-one.json"]).assert().failure().code(2);
}

fn fallback_vertex_width(xml: &str) -> String {
    let doc = roxmltree::Document::parse(xml).expect("valid xml");
    let cell = doc
        .descendants()
        .find(|n| n.attribute("id") == Some("odd"))
        .expect("fallback vertex");
    cell.children()
        .find(|n| n.has_tag_name("mxGeometry"))
        .and_then(|g| g.attribute("width"))
        .expect("geometry width")
        .to_string()
}

fn write_fallback_request(dir: &Path) -> PathBuf {
    let input = dir.join("input.json");
    fs::write(
        &input,
        r#"{"elements": [{"id": "odd", "type": "chevron", "width": 300, "height": 30}]}"#,
    )
    .expect("write input");
    fs::write(
        dir.join("symbols.json"),
        r#"{"templates": {}, "modifiers": {}}"#,
    )
    .expect("write symbols");
    input
}

#[test]
fn fallback_size_follows_flag_then_config_then_default() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_fallback_request(tmp.path());
    let out = tmp.path().join("out.xml");

    cli()
        .current_dir(tmp.path())
        .args(["generate", "input.json", "out.xml"])
        .assert()
        .success();
    assert_eq!(fallback_vertex_width(&fs::read_to_string(&out).unwrap()), "120");

    cli()
        .current_dir(tmp.path())
        .args(["generate", "--keep-fallback-size"])
        .arg(&input)
        .arg(&out)
        .assert()
        .success();
    assert_eq!(fallback_vertex_width(&fs::read_to_string(&out).unwrap()), "300");

    // The config file points at a registry that does not exist; --symbols overrides it.
    let config = tmp.path().join("drawsym.json");
    fs::write(
        &config,
        r#"{"preserveFallbackDimensions": true, "symbolsPath": "missing.json"}"#,
    )
    .expect("write config");
    cli()
        .current_dir(tmp.path())
        .args(["generate", "--config", "drawsym.json", "input.json", "out.xml"])
        .assert()
        .failure()
        .code(1);
    cli()
        .current_dir(tmp.path())
        .args([
            "generate",
            "--config",
            "drawsym.json",
            "--symbols",
            "symbols.json",
            "input.json",
            "out.xml",
        ])
        .assert()
        .success();
    assert_eq!(fallback_vertex_width(&fs::read_to_string(&out).unwrap()), "300");
}

#[test]
fn usage_errors_print_one_line() {
    let assert = cli()
        .args(["generate", "only-one.json"])
        .assert()
        .failure()
        .code(2);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert_eq!(stderr.trim_end().lines().count(), 1, "{stderr}");
    assert!(stderr.contains("expected <input.json> <output.xml>"), "{stderr}");

    let assert = cli().arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("USAGE:"), "{stdout}");
}
