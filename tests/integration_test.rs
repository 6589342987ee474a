// tests/integration_test.rs
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const CONFIG: &str = r#"
[build]
solution = "Widgets.sln"

[[tests]]
name = "unit"
kind = "xunit"
program = "xunit.console"
inputs = ["tests/Widgets.Tests.dll"]
results = "artifacts/test-results/xunit.xml"

[[copy]]
from = "src/Widgets/bin/Release/netstandard2.0"
to = "lib/netstandard2.0"
files = ["Widgets.dll", "Widgets.xml"]

[package]
projects = ["src/Widgets/Widgets.csproj"]

[[targets]]
name = "Docs"
description = "Generate API docs"
command = ["docfx", "docs/docfx.json"]
depends_on = ["Build"]
"#;

fn buildchain(args: &[&str]) -> Output {
    buildchain_in(Path::new("."), args)
}

fn buildchain_in(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_buildchain"))
        .current_dir(cwd)
        .args(args)
        .env_remove("BUILD_VERSION")
        .env_remove("BUILD_FILE_VERSION")
        .env_remove("BUILD_PACKAGE_VERSION")
        .env_remove("BUILD_NUMBER")
        .env_remove("BUILD_PARALLEL_TESTS")
        .env_remove("BUILD_MAX_THREADS")
        .output()
        .expect("Failed to execute buildchain")
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("buildchain.toml"), CONFIG).unwrap();
    dir
}

#[test]
fn test_buildchain_help() {
    let output = buildchain(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("buildchain"));
    assert!(stdout.contains("--dry-run"));
    assert!(stdout.contains("--set-version"));
}

#[test]
fn test_buildchain_version() {
    let output = buildchain(&["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_list_includes_custom_targets() {
    let dir = project();
    let output = buildchain(&["--list", "-C", dir.path().to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Publish"));
    assert!(stdout.contains("Docs"));
}

#[test]
fn test_dry_run_with_explicit_version() {
    let dir = project();
    let output = buildchain(&[
        "--dry-run",
        "--set-version",
        "4.2.0",
        "-C",
        dir.path().to_str().unwrap(),
    ]);

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(output.status.success(), "stdout: {}", stdout);
    assert!(stdout.contains("/p:Version=4.2.0"));
    assert!(stdout.contains("xunit.console"));
    assert!(stdout.contains("/p:PackageVersion=4.2.0"));
    assert!(stdout.contains("would copy"));
    assert!(!dir.path().join("artifacts").exists());
}

#[test]
fn test_relative_root_is_not_applied_twice() {
    let parent = TempDir::new().unwrap();
    let project = parent.path().join("proj");
    fs::create_dir_all(&project).unwrap();
    fs::write(project.join("buildchain.toml"), CONFIG).unwrap();

    let output = buildchain_in(
        parent.path(),
        &["--dry-run", "--set-version", "4.2.0", "-C", "proj", "Pack"],
    );

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(output.status.success(), "stdout: {}", stdout);
    let packages = project.canonicalize().unwrap().join("artifacts/packages");
    assert!(
        stdout.contains(&format!("-o {}", packages.display())),
        "stdout: {}",
        stdout
    );
}

#[test]
fn test_unknown_target_exits_with_error() {
    let dir = project();
    let output = buildchain(&[
        "--set-version",
        "4.2.0",
        "-C",
        dir.path().to_str().unwrap(),
        "Deploy",
    ]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_api_key_argument() {
    let output = buildchain(&["--api-key", "nuget"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("FEED=KEY"));
}
