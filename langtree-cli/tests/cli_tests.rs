use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

fn langtree() -> Command {
    Command::cargo_bin("langtree").unwrap()
}

#[test]
fn test_tree_shows_groups() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("greeting.en.json"), r#"{"hello": "Hello"}"#).unwrap();
    fs::write(root.join("greeting.fr.json"), r#"{"hello": "Bonjour"}"#).unwrap();
    fs::create_dir(root.join("en")).unwrap();
    fs::write(root.join("en").join("common.json"), "{}").unwrap();

    let output = langtree().arg("tree").arg(root).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "greeting [en, fr]\n  en: greeting.en.json\n  fr: greeting.fr.json\ncommon [en]\n  en: common.json\n"
    );
}

#[test]
fn test_tree_json_output() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("about.json"), r#"{"v": 1}"#).unwrap();

    let output = langtree()
        .args(["tree", "--json"])
        .arg(temp_dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["kind"], "file-group");
    assert_eq!(value[0]["name"], "about");
    assert_eq!(value[0]["items"][0]["language"], "about");
    assert_eq!(value[0]["items"][0]["data"]["v"], 1);
}

#[test]
fn test_tree_missing_dir_fails() {
    let temp_dir = TempDir::new().unwrap();
    langtree()
        .arg("tree")
        .arg(temp_dir.path().join("missing"))
        .assert()
        .failure();
}

#[test]
fn test_parse_and_save() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("messages.en.json");
    fs::write(&file, r#"{"keep": "me", "title": "Old"}"#).unwrap();

    langtree()
        .arg("save")
        .arg(&file)
        .args(["--data", r#"{"title": "New"}"#])
        .assert()
        .success();

    let output = langtree().arg("parse").arg(&file).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, serde_json::json!({ "keep": "me", "title": "New" }));
}

#[test]
fn test_save_unknown_extension_fails() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("notes.txt");
    fs::write(&file, "plain").unwrap();

    langtree()
        .arg("save")
        .arg(&file)
        .args(["--data", "{}"])
        .assert()
        .failure();
    assert_eq!(fs::read_to_string(&file).unwrap(), "plain");
}

#[test]
fn test_detect_with_extra_locale() {
    let output = langtree()
        .args(["detect", "greeting.en.json", "app.pseudo.json", "--locale", "pseudo"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("greeting.en.json -> prefix=greeting, language=en"));
    assert!(stdout.contains("app.pseudo.json -> prefix=app, language=pseudo"));
}

#[test]
fn test_plugins_respect_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("langtree.toml");
    fs::write(&config, "plugins = [\"yaml\", \"json\"]\n").unwrap();

    let output = langtree()
        .arg("plugins")
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "yaml: .yaml, .yml\njson: .json\n"
    );
}
