use assert_cmd::Command;
use predicates::prelude::*;

/// 사용자 설정에 영향받지 않도록 임시 HOME 사용
fn canyou(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("canyou").unwrap();
    cmd.env("HOME", home).env("USERPROFILE", home).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help() {
    let home = tempfile::tempdir().unwrap();
    canyou(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("safety-checked commands"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    let home = tempfile::tempdir().unwrap();
    canyou(home.path()).arg("--version").assert().success();
}

#[test]
fn test_missing_task() {
    let home = tempfile::tempdir().unwrap();
    canyou(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("required arguments were not provided"));
}

#[test]
fn test_unknown_provider_fails() {
    let home = tempfile::tempdir().unwrap();
    canyou(home.path())
        .args(["-p", "nonexistent", "--dry-run", "list", "files"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown AI provider"));
}

#[test]
fn test_malformed_config_fails() {
    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join(".canyou");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "default_provider = [").unwrap();

    canyou(home.path())
        .args(["--dry-run", "list", "files"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn test_init_config() {
    let home = tempfile::tempdir().unwrap();
    canyou(home.path()).arg("--init-config").assert().success();

    let written = std::fs::read_to_string(home.path().join(".canyou").join("config.toml")).unwrap();
    assert!(written.contains("default_provider = \"gemini\""));
}

#[test]
fn test_init_config_replaces_malformed_config() {
    let home = tempfile::tempdir().unwrap();
    let config_path = home.path().join(".canyou").join("config.toml");
    std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    std::fs::write(&config_path, "default_provider = [").unwrap();

    canyou(home.path()).arg("--init-config").assert().success();

    let written = std::fs::read_to_string(&config_path).unwrap();
    assert!(written.contains("default_provider = \"gemini\""));
}

#[test]
fn test_debug_flag_logs_config_loading() {
    let home = tempfile::tempdir().unwrap();
    canyou(home.path())
        .args(["-d", "-p", "nonexistent", "list", "files"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no config file, using defaults"));
}
