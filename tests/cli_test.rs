//! CLI integration tests
//! Run with: cargo test --test cli_test

use std::path::PathBuf;
use std::process::Command;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_wabot")
}

fn temp_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("wabot-test-{}-{}", std::process::id(), name));
    path
}

#[test]
fn version_prints_package_version() {
    let output = Command::new(bin())
        .arg("version")
        .output()
        .expect("should run wabot version");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(concat!("wabot v", env!("CARGO_PKG_VERSION"))),
        "unexpected version output: {}",
        stdout
    );
}

#[test]
fn init_config_writes_default_yaml() {
    let config_path = temp_path("config.yaml");
    let _ = std::fs::remove_file(&config_path);

    let output = Command::new(bin())
        .args(["--config", config_path.to_str().unwrap(), "init-config"])
        .output()
        .expect("should run wabot init-config");

    assert!(output.status.success());

    let content = std::fs::read_to_string(&config_path).expect("config file should exist");
    assert!(content.contains("prefix"), "config should set a prefix");
    assert!(content.contains("auth_info"), "config should set session dir");
    assert!(content.contains("whatsapp"), "config should list adapters");

    let _ = std::fs::remove_file(&config_path);
}

#[test]
fn init_config_does_not_overwrite() {
    let config_path = temp_path("existing.yaml");
    std::fs::write(&config_path, "bot:\n  name: keepme\n").unwrap();

    let output = Command::new(bin())
        .args(["--config", config_path.to_str().unwrap(), "init-config"])
        .output()
        .expect("should run wabot init-config");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("already exists"), "got: {}", stdout);

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("keepme"), "existing config should be untouched");

    let _ = std::fs::remove_file(&config_path);
}
