//! Integration tests for the dotnet-ver CLI

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const APP_PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <OutputType>Exe</OutputType>
    <TargetFramework>net8.0</TargetFramework>
    <Version>0.1.1</Version>
  </PropertyGroup>
</Project>
"#;

const LEGACY_PROJECT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="15.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup>
    <Version>0.1.1</Version>
  </PropertyGroup>
</Project>
"#;

fn create_test_workspace() -> TempDir {
    let temp = TempDir::new().unwrap();

    let app = temp.path().join("src/App");
    let legacy = temp.path().join("src/Legacy");
    fs::create_dir_all(&app).unwrap();
    fs::create_dir_all(&legacy).unwrap();

    fs::write(app.join("App.csproj"), APP_PROJECT).unwrap();
    fs::write(legacy.join("Legacy.csproj"), LEGACY_PROJECT).unwrap();

    temp
}

fn dotnet_ver(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dotnet-ver"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("DOTNET_VER_LOG")
        .output()
        .unwrap()
}

fn read(workspace: &TempDir, rel: &str) -> String {
    fs::read_to_string(workspace.path().join(rel)).unwrap()
}

#[test]
fn test_auto_increment() {
    let workspace = create_test_workspace();

    let output = dotnet_ver(workspace.path(), &[]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("App.csproj"));
    assert!(stdout.contains("Set Version              from 0.1.1 -> 0.1.2"));
    assert!(stdout.contains("Set PackageVersion       from \"\" -> 0.1.2"));
    assert!(stdout.contains("(Skipped. "));
    assert!(stdout.contains("1 updated, 1 skipped"));

    let app = read(&workspace, "src/App/App.csproj");
    for field in [
        "Version",
        "FileVersion",
        "AssemblyVersion",
        "PackageVersion",
        "InformationVersion",
    ] {
        assert!(
            app.contains(&format!("<{field}>0.1.2</{field}>")),
            "{field} not updated in:\n{app}"
        );
    }
    assert!(app.contains("<TargetFramework>net8.0</TargetFramework>"));

    assert_eq!(read(&workspace, "src/Legacy/Legacy.csproj"), LEGACY_PROJECT);
}

#[test]
fn test_explicit_version_with_directory() {
    let workspace = create_test_workspace();
    let elsewhere = TempDir::new().unwrap();
    let dir = workspace.path().join("src").to_string_lossy().to_string();

    let output = dotnet_ver(elsewhere.path(), &["-d", dir.as_str(), "--version", "1.2"]);
    assert_eq!(output.status.code(), Some(0));

    let app = read(&workspace, "src/App/App.csproj");
    assert!(app.contains("<Version>1.2</Version>"));
    assert!(app.contains("<InformationVersion>1.2</InformationVersion>"));
}

#[test]
fn test_plain_output() {
    let workspace = create_test_workspace();

    let output = dotnet_ver(workspace.path(), &["-v", "0.1.15", "-p"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "0.1.15\n");

    let output = dotnet_ver(workspace.path(), &["--plain"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "0.1.16\n");
}

#[test]
fn test_list_does_not_modify() {
    let workspace = create_test_workspace();

    let output = dotnet_ver(workspace.path(), &["list"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("  Version              = 0.1.1"));
    assert!(stdout.contains("  FileVersion          =\n"));
    assert!(stdout.contains("1 listed, 1 skipped"));

    assert_eq!(read(&workspace, "src/App/App.csproj"), APP_PROJECT);
    assert_eq!(read(&workspace, "src/Legacy/Legacy.csproj"), LEGACY_PROJECT);
}

#[test]
fn test_list_with_only_unrecognized_projects() {
    let workspace = TempDir::new().unwrap();
    fs::write(workspace.path().join("Legacy.csproj"), LEGACY_PROJECT).unwrap();

    let output = dotnet_ver(workspace.path(), &["list"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0 listed, 1 skipped"));
    assert!(!stdout.contains("updated"));
}

#[test]
fn test_list_json() {
    let workspace = create_test_workspace();

    let output = dotnet_ver(workspace.path(), &["list", "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["status"], "listed");
    assert_eq!(entries[0]["fields"][0]["value"], "0.1.1");
    assert_eq!(entries[1]["status"], "not-recognized");
}

#[test]
fn test_ambiguous_field_leaves_file_untouched() {
    let workspace = TempDir::new().unwrap();
    let content = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <Version>1.0.0</Version>
  </PropertyGroup>
  <PropertyGroup>
    <PackageVersion>1.0.0</PackageVersion>
    <PackageVersion>1.0.0-beta</PackageVersion>
  </PropertyGroup>
</Project>
"#;
    fs::write(workspace.path().join("Pkg.csproj"), content).unwrap();

    let output = dotnet_ver(workspace.path(), &[]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Ambiguous field PackageVersion"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Pkg.csproj"));
    assert_eq!(read(&workspace, "Pkg.csproj"), content);
}

#[test]
fn test_missing_directory_fails() {
    let workspace = create_test_workspace();

    let output = dotnet_ver(workspace.path(), &["-d", "does-not-exist"]);
    assert_ne!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("does-not-exist"));
}

#[test]
fn test_empty_explicit_version_is_rejected() {
    let workspace = create_test_workspace();

    let output = dotnet_ver(workspace.path(), &["--version", ""]);
    assert_ne!(output.status.code(), Some(0));
    assert_eq!(read(&workspace, "src/App/App.csproj"), APP_PROJECT);
}

#[test]
fn test_list_rejects_sync_options() {
    let workspace = create_test_workspace();

    let output = dotnet_ver(workspace.path(), &["-v", "1.0.0", "list"]);
    assert_ne!(output.status.code(), Some(0));
    assert_eq!(read(&workspace, "src/App/App.csproj"), APP_PROJECT);
}
