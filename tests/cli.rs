#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

const SVG: &str = r#"<svg role="img" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path d="M0 0h24v24H0z"/></svg>"#;

fn repo(linter: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    fs::create_dir_all(root.join("_data")).unwrap();
    fs::write(
        root.join("_data/simple-icons.json"),
        "{\n    \"icons\": [\n        {\n            \"title\": \"Zoom\",\n            \"hex\": \"2D8CFF\",\n            \"source\": \"https://zoom.us\"\n        }\n    ]\n}\n",
    )
    .unwrap();
    fs::write(root.join("source.svg"), SVG).unwrap();
    fs::write(
        root.join("create-si.json"),
        format!(
            r#"{{
    "optimizer": {{ "program": "cat", "args": ["{{{{input}}}}"] }},
    "linter": {{ "program": "{}", "args": ["{{{{file}}}}"] }}
}}"#,
            linter
        ),
    )
    .unwrap();

    dir
}

fn run(root: &Path, args: &[&str]) -> (Value, i32) {
    run_from(Path::new("."), root, args)
}

fn run_from(cwd: &Path, root: &Path, args: &[&str]) -> (Value, i32) {
    let output: Output = Command::new(env!("CARGO_BIN_EXE_create-si"))
        .args(args)
        .arg("-C")
        .arg(root)
        .current_dir(cwd)
        .output()
        .unwrap();

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    (json, output.status.code().unwrap())
}

fn add_args<'a>(title: &'a str, extra: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec![
        "--file",
        "source.svg",
        "--title",
        title,
        "--hex",
        "#ff5500",
        "--source",
        "https://example.com/brand",
    ];
    args.extend_from_slice(extra);
    args
}

#[test]
fn adds_icon_catalog_entry_and_file() {
    let dir = repo("true");
    let (json, code) = run(dir.path(), &add_args("Foo Bar", &[]));

    assert_eq!(code, 0, "{}", json);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["action"], "appended");
    assert_eq!(json["data"]["slug"], "foobar");
    assert_eq!(json["data"]["catalogLine"], "_data/simple-icons.json:4");

    let icon = fs::read_to_string(dir.path().join("icons/foobar.svg")).unwrap();
    assert!(icon.contains("<title>Foo Bar</title><path"));

    let catalog = fs::read_to_string(dir.path().join("_data/simple-icons.json")).unwrap();
    assert!(catalog.ends_with("}\n"));
    let first = catalog.find("Foo Bar").unwrap();
    let second = catalog.find("Zoom").unwrap();
    assert!(first < second);
    assert!(catalog.contains("\"hex\": \"FF5500\""));
}

#[test]
fn duplicate_without_merge_is_conflict() {
    let dir = repo("true");
    run(dir.path(), &add_args("Foo Bar", &[]));
    let catalog_path = dir.path().join("_data/simple-icons.json");
    let before = fs::read_to_string(&catalog_path).unwrap();

    let (json, code) = run(dir.path(), &add_args("Foo Bar", &[]));

    assert_eq!(code, 3);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "icon.conflict");
    assert_eq!(fs::read_to_string(&catalog_path).unwrap(), before);
}

#[test]
fn duplicate_with_merge_replaces_entry() {
    let dir = repo("true");
    run(dir.path(), &add_args("Foo Bar", &[]));

    let (json, code) = run(
        dir.path(),
        &add_args("Foo Bar", &["--merge", "--guidelines", "https://example.com/guidelines"]),
    );

    assert_eq!(code, 0, "{}", json);
    assert_eq!(json["data"]["action"], "merged");

    let catalog = fs::read_to_string(dir.path().join("_data/simple-icons.json")).unwrap();
    assert_eq!(catalog.matches("\"title\": \"Foo Bar\"").count(), 1);
    assert!(catalog.contains("https://example.com/guidelines"));
}

#[test]
fn failing_linter_sets_exit_code() {
    let dir = repo("false");
    let (json, code) = run(dir.path(), &add_args("Foo Bar", &[]));

    assert_eq!(code, 1);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["lint"]["passed"], false);
    assert!(dir.path().join("icons/foobar.svg").exists());
}

#[test]
fn dry_run_writes_nothing() {
    let dir = repo("true");
    let catalog_path = dir.path().join("_data/simple-icons.json");
    let before = fs::read_to_string(&catalog_path).unwrap();

    let (json, code) = run(dir.path(), &add_args("Foo Bar", &["--dry-run"]));

    assert_eq!(code, 0, "{}", json);
    assert_eq!(json["data"]["dryRun"], true);
    assert_eq!(fs::read_to_string(&catalog_path).unwrap(), before);
    assert!(!dir.path().join("icons").exists());
}

#[test]
fn missing_flags_without_terminal_are_reported() {
    let dir = repo("true");
    let (json, code) = run(dir.path(), &["--title", "Foo"]);

    assert_eq!(code, 2);
    assert_eq!(json["error"]["code"], "validation.missing_argument");
    let missing = json["error"]["details"]["args"].to_string();
    assert!(missing.contains("--file"));
    assert!(missing.contains("--hex"));
    assert!(missing.contains("--source"));
}

#[test]
fn invalid_hex_flag_is_rejected() {
    let dir = repo("true");
    let mut args = add_args("Foo Bar", &[]);
    args[5] = "#ff55";

    let (json, code) = run(dir.path(), &args);
    assert_eq!(code, 2);
    assert_eq!(json["error"]["code"], "validation.invalid_argument");
}

#[test]
fn slug_command_prints_normalized_titles() {
    let dir = TempDir::new().unwrap();
    let (json, code) = run(dir.path(), &["slug", "C++", "Node.js"]);

    assert_eq!(code, 0);
    assert_eq!(json["data"]["slugs"][0]["slug"], "cplusplus");
    assert_eq!(json["data"]["slugs"][1]["slug"], "nodedotjs");
}

#[test]
fn tools_run_inside_relative_root() {
    let outer = TempDir::new().unwrap();
    let root = outer.path().join("repo");
    fs::create_dir_all(root.join("_data")).unwrap();
    fs::write(root.join("_data/simple-icons.json"), "{\n    \"icons\": []\n}\n").unwrap();
    fs::write(root.join("source.svg"), SVG).unwrap();
    fs::write(root.join(".svglintrc.js"), "").unwrap();
    fs::write(
        root.join("create-si.json"),
        r#"{
    "optimizer": { "program": "sh", "args": ["-c", "test -f .svglintrc.js && cat \"$0\"", "{{input}}"] },
    "linter": { "program": "sh", "args": ["-c", "test -f .svglintrc.js", "{{file}}"] }
}"#,
    )
    .unwrap();

    let (json, code) = run_from(outer.path(), Path::new("repo"), &add_args("Foo Bar", &[]));

    assert_eq!(code, 0, "{}", json);
    assert_eq!(json["data"]["lint"]["passed"], true);
    assert_eq!(json["data"]["iconPath"], "icons/foobar.svg");
    assert!(root.join("icons/foobar.svg").exists());
}
